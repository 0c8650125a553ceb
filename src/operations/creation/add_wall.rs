use crate::error::Result;
use crate::plan::{CornerId, FloorPlan, PlanEvent, WallData, WallId};

/// Creates a new wall between two existing corners, with the plan's
/// default thickness and height.
pub struct AddWall {
    start: CornerId,
    end: CornerId,
}

impl AddWall {
    /// Creates a new `AddWall` operation.
    #[must_use]
    pub fn new(start: CornerId, end: CornerId) -> Self {
        Self { start, end }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if either corner is not found, the wall would be
    /// a self-loop, or the terminal update fails.
    pub fn execute(&self, plan: &mut FloorPlan) -> Result<WallId> {
        let thickness = plan.config().wall_thickness;
        let height = plan.config().wall_height;
        let id = plan.add_wall(WallData::new(self.start, self.end, thickness, height))?;
        plan.emit(&PlanEvent::WallAdded(id));
        plan.update()?;
        Ok(id)
    }
}

use uuid::Uuid;

use crate::error::Result;
use crate::math::Point2;
use crate::plan::{CornerData, CornerId, FloorPlan, PlanEvent};

/// Creates a new corner at a position.
///
/// The corner starts detached; it becomes part of the plan's topology
/// once a wall attaches to it.
pub struct AddCorner {
    x: f64,
    y: f64,
    uuid: Option<String>,
}

impl AddCorner {
    /// Creates a new `AddCorner` operation with a generated uuid.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, uuid: None }
    }

    /// Uses a caller-supplied uuid instead of generating one. Load paths
    /// use this to preserve ids across save/load.
    #[must_use]
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal update fails.
    pub fn execute(&self, plan: &mut FloorPlan) -> Result<CornerId> {
        let uuid = self
            .uuid
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let id = plan.add_corner(CornerData::new(uuid, Point2::new(self.x, self.y)));
        plan.emit(&PlanEvent::CornerAdded(id));
        plan.update()?;
        Ok(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn generated_uuids_are_unique() {
        let mut plan = FloorPlan::default();
        let a = AddCorner::new(0.0, 0.0).execute(&mut plan).unwrap();
        let b = AddCorner::new(1.0, 0.0).execute(&mut plan).unwrap();
        assert_ne!(
            plan.corner(a).unwrap().uuid,
            plan.corner(b).unwrap().uuid
        );
    }

    #[test]
    fn supplied_uuid_is_kept() {
        let mut plan = FloorPlan::default();
        let a = AddCorner::new(2.0, 3.0)
            .with_uuid("c-1")
            .execute(&mut plan)
            .unwrap();
        let corner = plan.corner(a).unwrap();
        assert_eq!(corner.uuid, "c-1");
        assert_eq!(corner.position, Point2::new(2.0, 3.0));
    }
}

use crate::error::Result;
use crate::plan::{CornerId, FloorPlan, PlanEvent, WallId};

/// Detaches `wall` from `corner`; a corner left with no attached walls
/// is implicitly deleted and removed from the plan.
pub(crate) fn detach_and_reap(plan: &mut FloorPlan, corner: CornerId, wall: WallId) -> Result<()> {
    if plan.detach_wall(corner, wall)? {
        plan.remove_corner_entity(corner);
        plan.emit(&PlanEvent::CornerRemoved(corner));
    }
    Ok(())
}

/// Drops a wall from the plan without running an update: detaches both
/// endpoints (reaping corners left empty) and fires the deletion event.
pub(crate) fn drop_wall(plan: &mut FloorPlan, wall: WallId) -> Result<()> {
    let (start, end) = {
        let data = plan.wall(wall)?;
        (data.start, data.end)
    };
    detach_and_reap(plan, start, wall)?;
    if end != start {
        detach_and_reap(plan, end, wall)?;
    }
    plan.remove_wall_entity(wall);
    plan.emit(&PlanEvent::WallRemoved(wall));
    Ok(())
}

/// Removes a wall from the plan.
pub struct RemoveWall {
    wall: WallId,
}

impl RemoveWall {
    /// Creates a new `RemoveWall` operation.
    #[must_use]
    pub fn new(wall: WallId) -> Self {
        Self { wall }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not found or the terminal update
    /// fails.
    pub fn execute(&self, plan: &mut FloorPlan) -> Result<()> {
        drop_wall(plan, self.wall)?;
        plan.update()
    }
}

/// Removes a corner together with every wall attached to it.
pub struct RemoveCorner {
    corner: CornerId,
}

impl RemoveCorner {
    /// Creates a new `RemoveCorner` operation.
    #[must_use]
    pub fn new(corner: CornerId) -> Self {
        Self { corner }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the corner is not found or the terminal
    /// update fails.
    pub fn execute(&self, plan: &mut FloorPlan) -> Result<()> {
        for wall in plan.corner(self.corner)?.attached_walls() {
            // A self-loop appears in both adjacency lists; it is gone
            // after the first drop.
            if plan.wall(wall).is_ok() {
                drop_wall(plan, wall)?;
            }
        }
        // Detaching the last wall already reaped the corner unless it
        // never had one.
        if plan.corner(self.corner).is_ok() {
            plan.remove_corner_entity(self.corner);
            plan.emit(&PlanEvent::CornerRemoved(self.corner));
        }
        plan.update()
    }
}

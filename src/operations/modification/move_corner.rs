use crate::error::Result;
use crate::math::Point2;
use crate::plan::{CornerId, FloorPlan, PlanEvent};

use super::merge::merge_with_intersected;

/// Moves a corner to a new position, merging it with whatever it lands
/// on and snapping it onto the axes of adjacent corners.
pub struct MoveCorner {
    corner: CornerId,
    x: f64,
    y: f64,
    snap: bool,
}

impl MoveCorner {
    /// Creates a new `MoveCorner` operation with axis snapping enabled.
    #[must_use]
    pub fn new(corner: CornerId, x: f64, y: f64) -> Self {
        Self {
            corner,
            x,
            y,
            snap: true,
        }
    }

    /// Disables axis snapping for this move (used when dragging a whole
    /// wall, which snaps as a rigid unit instead).
    #[must_use]
    pub fn without_snap(mut self) -> Self {
        self.snap = false;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the corner is not found or the terminal
    /// update fails.
    pub fn execute(&self, plan: &mut FloorPlan) -> Result<()> {
        plan.corner_mut(self.corner)?.position = Point2::new(self.x, self.y);

        merge_with_intersected(plan, self.corner)?;

        if self.snap {
            let tolerance = plan.config().axis_snap_tolerance;
            snap_to_axis(plan, self.corner, tolerance)?;
        }

        plan.emit(&PlanEvent::CornerMoved(self.corner));
        for wall in plan.corner(self.corner)?.attached_walls() {
            plan.emit(&PlanEvent::WallMoved(wall));
        }
        plan.update()
    }
}

/// Aligns a corner to any adjacent corner within `tolerance` on either
/// axis; the first match per axis wins.
pub(crate) fn snap_to_axis(plan: &mut FloorPlan, corner: CornerId, tolerance: f64) -> Result<()> {
    let mut position = plan.corner(corner)?.position;
    let mut snapped_x = false;
    let mut snapped_y = false;

    for adjacent in plan.adjacent_corners(corner)? {
        let other = plan.corner(adjacent)?.position;
        if !snapped_x && (position.x - other.x).abs() < tolerance {
            position.x = other.x;
            snapped_x = true;
        }
        if !snapped_y && (position.y - other.y).abs() < tolerance {
            position.y = other.y;
            snapped_y = true;
        }
    }

    plan.corner_mut(corner)?.position = position;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::{AddCorner, AddWall};

    #[test]
    fn move_fires_wall_moved_and_updates() {
        let mut plan = FloorPlan::default();
        let a = AddCorner::new(0.0, 0.0).execute(&mut plan).unwrap();
        let b = AddCorner::new(4.0, 0.0).execute(&mut plan).unwrap();
        let c = AddCorner::new(4.0, 3.0).execute(&mut plan).unwrap();
        let d = AddCorner::new(0.0, 3.0).execute(&mut plan).unwrap();
        for (s, e) in [(a, b), (b, c), (c, d), (d, a)] {
            AddWall::new(s, e).execute(&mut plan).unwrap();
        }

        MoveCorner::new(a, -1.0, -1.0).execute(&mut plan).unwrap();

        assert_eq!(plan.corner(a).unwrap().position, Point2::new(-1.0, -1.0));
        // Room geometry followed the corner.
        assert_eq!(plan.rooms().len(), 1);
        let outline = &plan.rooms()[0].interior_corners;
        assert!(outline
            .iter()
            .any(|p| (p - Point2::new(-1.0, -1.0)).norm() < 0.5));
    }

    #[test]
    fn snap_aligns_to_adjacent_axes() {
        let mut plan = FloorPlan::default();
        let a = AddCorner::new(0.0, 0.0).execute(&mut plan).unwrap();
        let b = AddCorner::new(4.0, 0.0).execute(&mut plan).unwrap();
        AddWall::new(a, b).execute(&mut plan).unwrap();

        // Within 0.25 of b's y axis; x stays free.
        MoveCorner::new(a, 1.0, 0.2).execute(&mut plan).unwrap();
        assert_eq!(plan.corner(a).unwrap().position, Point2::new(1.0, 0.0));
    }

    #[test]
    fn without_snap_keeps_raw_position() {
        let mut plan = FloorPlan::default();
        let a = AddCorner::new(0.0, 0.0).execute(&mut plan).unwrap();
        let b = AddCorner::new(4.0, 0.0).execute(&mut plan).unwrap();
        AddWall::new(a, b).execute(&mut plan).unwrap();

        MoveCorner::new(a, 1.0, 0.2)
            .without_snap()
            .execute(&mut plan)
            .unwrap();
        assert_eq!(plan.corner(a).unwrap().position, Point2::new(1.0, 0.2));
    }

    #[test]
    fn moving_within_merge_distance_absorbs_the_other_corner() {
        let mut plan = FloorPlan::default();
        let a = AddCorner::new(0.0, 0.0).execute(&mut plan).unwrap();
        let b = AddCorner::new(4.0, 0.0).execute(&mut plan).unwrap();
        let c = AddCorner::new(4.0, 3.0).execute(&mut plan).unwrap();
        AddWall::new(a, b).execute(&mut plan).unwrap();
        AddWall::new(b, c).execute(&mut plan).unwrap();
        assert_eq!(plan.corners().count(), 3);

        MoveCorner::new(a, 3.9, 0.05).execute(&mut plan).unwrap();

        // a absorbed b; its wall list grew by b's remaining wall.
        assert_eq!(plan.corners().count(), 2);
        assert!(plan.corner(b).is_err());
        assert_eq!(plan.corner(a).unwrap().attached_walls().len(), 1);
    }
}

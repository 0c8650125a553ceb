use std::collections::HashSet;

use crate::error::Result;
use crate::math::{Vector2, TOLERANCE};
use crate::plan::{CornerId, FloorPlan, PlanEvent, WallId};

use super::merge::merge_with_intersected;

/// Drags a whole wall by a delta. Both corners move without per-corner
/// axis snapping; the wall then snaps as a rigid unit, and wall-mounted
/// items keep their fractional position along the wall.
pub struct MoveWall {
    wall: WallId,
    dx: f64,
    dy: f64,
}

impl MoveWall {
    /// Creates a new `MoveWall` operation.
    #[must_use]
    pub fn new(wall: WallId, dx: f64, dy: f64) -> Self {
        Self { wall, dx, dy }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not found or the terminal update
    /// fails.
    pub fn execute(&self, plan: &mut FloorPlan) -> Result<()> {
        let (old_start, old_end) = plan.wall_span(self.wall)?;
        let old_angle = (old_end.y - old_start.y).atan2(old_end.x - old_start.x);
        let (start, end) = {
            let wall = plan.wall(self.wall)?;
            (wall.start, wall.end)
        };

        let delta = Vector2::new(self.dx, self.dy);
        plan.corner_mut(start)?.position = old_start + delta;
        plan.corner_mut(end)?.position = old_end + delta;

        // Landing on other geometry still merges; the wall itself may
        // not survive that.
        merge_with_intersected(plan, start)?;
        if plan.wall(self.wall).is_ok() {
            merge_with_intersected(plan, end)?;
        }
        if plan.wall(self.wall).is_err() {
            return plan.update();
        }

        let tolerance = plan.config().axis_snap_tolerance;
        snap_wall_rigidly(plan, self.wall, tolerance)?;
        reposition_items(plan, self.wall, old_start, old_end, old_angle)?;

        plan.emit(&PlanEvent::WallMoved(self.wall));
        plan.update()
    }
}

/// Applies one common axis-snap delta to both endpoints, found against
/// corners adjacent to either end (excluding the wall's own corners), so
/// the wall translates without shearing.
fn snap_wall_rigidly(plan: &mut FloorPlan, wall: WallId, tolerance: f64) -> Result<()> {
    let (start, end) = {
        let data = plan.wall(wall)?;
        (data.start, data.end)
    };
    let own: HashSet<CornerId> = [start, end].into_iter().collect();

    let mut dx: Option<f64> = None;
    let mut dy: Option<f64> = None;
    for corner in [start, end] {
        let position = plan.corner(corner)?.position;
        for adjacent in plan.adjacent_corners(corner)? {
            if own.contains(&adjacent) {
                continue;
            }
            let other = plan.corner(adjacent)?.position;
            if dx.is_none() && (position.x - other.x).abs() < tolerance {
                dx = Some(other.x - position.x);
            }
            if dy.is_none() && (position.y - other.y).abs() < tolerance {
                dy = Some(other.y - position.y);
            }
        }
    }

    let shift = Vector2::new(dx.unwrap_or(0.0), dy.unwrap_or(0.0));
    if shift.norm() > 0.0 {
        plan.corner_mut(start)?.position += shift;
        plan.corner_mut(end)?.position += shift;
    }
    Ok(())
}

/// Preserves each item's fractional position along the wall against the
/// new endpoints and rotates it by the wall's angle delta.
fn reposition_items(
    plan: &mut FloorPlan,
    wall: WallId,
    old_start: crate::math::Point2,
    old_end: crate::math::Point2,
    old_angle: f64,
) -> Result<()> {
    let (new_start, new_end) = plan.wall_span(wall)?;
    let old_length = (old_end - old_start).norm();
    if old_length < TOLERANCE {
        return Ok(());
    }
    let new_angle = (new_end.y - new_start.y).atan2(new_end.x - new_start.x);
    let angle_delta = new_angle - old_angle;

    let data = plan.wall_mut(wall)?;
    for item in &mut data.items {
        let fraction = (item.position - old_start).norm() / old_length;
        item.position = new_start + (new_end - new_start) * fraction;
        item.rotation += angle_delta;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::operations::creation::{AddCorner, AddWall};
    use crate::plan::WallItem;

    #[test]
    fn wall_translates_rigidly() {
        let mut plan = FloorPlan::default();
        let a = AddCorner::new(0.0, 0.0).execute(&mut plan).unwrap();
        let b = AddCorner::new(4.0, 0.0).execute(&mut plan).unwrap();
        let w = AddWall::new(a, b).execute(&mut plan).unwrap();

        MoveWall::new(w, 1.0, 2.0).execute(&mut plan).unwrap();

        assert_eq!(plan.corner(a).unwrap().position, Point2::new(1.0, 2.0));
        assert_eq!(plan.corner(b).unwrap().position, Point2::new(5.0, 2.0));
    }

    #[test]
    fn items_keep_their_fraction_along_the_wall() {
        let mut plan = FloorPlan::default();
        let a = AddCorner::new(0.0, 0.0).execute(&mut plan).unwrap();
        let b = AddCorner::new(4.0, 0.0).execute(&mut plan).unwrap();
        let w = AddWall::new(a, b).execute(&mut plan).unwrap();

        plan.wall_mut(w).unwrap().items.push(WallItem {
            uuid: "door-1".into(),
            position: Point2::new(1.0, 0.0),
            rotation: 0.0,
        });

        MoveWall::new(w, 0.0, 2.0).execute(&mut plan).unwrap();

        let item = &plan.wall(w).unwrap().items[0];
        // Quarter of the way along the translated wall.
        assert!((item.position - Point2::new(1.0, 2.0)).norm() < 1e-9);
        assert!(item.rotation.abs() < 1e-9);
    }

    #[test]
    fn dragged_wall_snaps_against_neighbor_axis() {
        let mut plan = FloorPlan::default();
        let a = AddCorner::new(0.0, 0.0).execute(&mut plan).unwrap();
        let b = AddCorner::new(4.0, 0.0).execute(&mut plan).unwrap();
        let c = AddCorner::new(4.0, 3.0).execute(&mut plan).unwrap();
        AddWall::new(a, b).execute(&mut plan).unwrap();
        let w = AddWall::new(b, c).execute(&mut plan).unwrap();

        // After the drag b sits at (4.9, 0.1); its off-wall neighbor a
        // is at y = 0, within snap tolerance.
        MoveWall::new(w, 0.9, 0.1).execute(&mut plan).unwrap();

        let b_pos = plan.corner(b).unwrap().position;
        let c_pos = plan.corner(c).unwrap().position;
        assert!((b_pos.y - 0.0).abs() < 1e-9, "b={b_pos:?}");
        // The snap moved both corners by the same delta.
        assert!((c_pos.y - 3.0).abs() < 1e-9, "c={c_pos:?}");
        assert!((b_pos.x - 4.9).abs() < 1e-9);
    }
}

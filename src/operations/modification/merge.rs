use std::collections::HashSet;

use crate::error::Result;
use crate::math::distance_2d::{closest_point_on_segment, point_to_segment_dist};
use crate::plan::{CornerId, FloorPlan, PlanEvent, WallData, WallId};

use super::remove::{detach_and_reap, drop_wall};

/// Reparents a wall's start onto `corner`, firing a move notification.
/// The old corner self-removes if this was its last wall.
pub(crate) fn set_wall_start(plan: &mut FloorPlan, wall: WallId, corner: CornerId) -> Result<()> {
    let old = plan.wall(wall)?.start;
    if old == corner {
        return Ok(());
    }
    detach_and_reap(plan, old, wall)?;
    plan.wall_mut(wall)?.start = corner;
    plan.corner_mut(corner)?.wall_starts.push(wall);
    plan.emit(&PlanEvent::WallMoved(wall));
    Ok(())
}

/// Reparents a wall's end onto `corner`, firing a move notification.
pub(crate) fn set_wall_end(plan: &mut FloorPlan, wall: WallId, corner: CornerId) -> Result<()> {
    let old = plan.wall(wall)?.end;
    if old == corner {
        return Ok(());
    }
    detach_and_reap(plan, old, wall)?;
    plan.wall_mut(wall)?.end = corner;
    plan.corner_mut(corner)?.wall_ends.push(wall);
    plan.emit(&PlanEvent::WallMoved(wall));
    Ok(())
}

/// Absorbs `other` into `corner`: the surviving corner adopts `other`'s
/// position, every wall attached to `other` is reparented, duplicate
/// walls are dropped and the plan is updated. Merging a corner with
/// itself is a no-op.
///
/// # Errors
///
/// Returns an error if either corner is not found or the update fails.
pub fn combine_with_corner(
    plan: &mut FloorPlan,
    corner: CornerId,
    other: CornerId,
) -> Result<()> {
    if corner == other {
        return Ok(());
    }

    let position = plan.corner(other)?.position;
    plan.corner_mut(corner)?.position = position;

    let starts = plan.corner(other)?.wall_starts.clone();
    let ends = plan.corner(other)?.wall_ends.clone();
    for wall in starts {
        set_wall_start(plan, wall, corner)?;
    }
    for wall in ends {
        set_wall_end(plan, wall, corner)?;
    }
    // Reparenting the last wall reaped `other`; a corner that somehow
    // had none is removed here.
    if plan.corner(other).is_ok() {
        plan.remove_corner_entity(other);
        plan.emit(&PlanEvent::CornerRemoved(other));
    }

    remove_duplicate_walls(plan, corner)?;
    plan.update()
}

/// Drops walls around `corner` that became parallel duplicates after a
/// merge: self-loops, and walls sharing the same unordered corner pair
/// with an earlier wall.
///
/// # Errors
///
/// Returns an error if the corner is not found.
pub fn remove_duplicate_walls(plan: &mut FloorPlan, corner: CornerId) -> Result<()> {
    let mut seen: HashSet<(CornerId, CornerId)> = HashSet::new();
    for wall in plan.corner(corner)?.attached_walls() {
        // A self-loop sits in both adjacency lists and may be gone already.
        let Ok(data) = plan.wall(wall) else {
            continue;
        };
        let (start, end) = (data.start, data.end);
        if start == end {
            drop_wall(plan, wall)?;
            continue;
        }
        let key = if start <= end { (start, end) } else { (end, start) };
        if !seen.insert(key) {
            drop_wall(plan, wall)?;
        }
    }
    Ok(())
}

/// Merges `corner` into whatever it landed on: another corner within the
/// merge distance, or an unconnected wall within the snap distance (the
/// wall is split at the snapped point). Returns true when a merge or
/// split happened; both paths run a plan update.
///
/// # Errors
///
/// Returns an error if the corner is not found or the update fails.
pub fn merge_with_intersected(plan: &mut FloorPlan, corner: CornerId) -> Result<bool> {
    let merge_distance = plan.config().corner_merge_distance;
    let snap_distance = plan.config().wall_snap_distance;
    let position = plan.corner(corner)?.position;

    // Another corner within tolerance absorbs into this one.
    let mut other = None;
    for (id, data) in plan.corners() {
        if id != corner && (data.position - position).norm() < merge_distance {
            other = Some(id);
            break;
        }
    }
    if let Some(other) = other {
        combine_with_corner(plan, corner, other)?;
        return Ok(true);
    }

    // Otherwise snap onto the closest unconnected wall and split it.
    let attached: HashSet<WallId> = plan.corner(corner)?.attached_walls().into_iter().collect();
    let mut best: Option<(WallId, f64)> = None;
    for (id, _) in plan.walls() {
        if attached.contains(&id) {
            continue;
        }
        let (a, b) = plan.wall_span(id)?;
        let dist = point_to_segment_dist(&position, &a, &b);
        if dist < snap_distance && best.is_none_or(|(_, d)| dist < d) {
            best = Some((id, dist));
        }
    }
    if let Some((wall, _)) = best {
        let (a, b) = plan.wall_span(wall)?;
        let (snapped, _) = closest_point_on_segment(&position, &a, &b);
        plan.corner_mut(corner)?.position = snapped;
        split_wall_at(plan, wall, corner)?;
        plan.update()?;
        return Ok(true);
    }

    Ok(false)
}

/// Splits `wall` at `corner`: a new wall runs from the corner to the old
/// far endpoint, and the original wall is shortened to end at the
/// corner. The new wall inherits the split wall's dimensions and
/// textures.
fn split_wall_at(plan: &mut FloorPlan, wall: WallId, corner: CornerId) -> Result<()> {
    let (far_end, thickness, height, front_texture, back_texture) = {
        let data = plan.wall(wall)?;
        (
            data.end,
            data.thickness,
            data.height,
            data.front_texture.clone(),
            data.back_texture.clone(),
        )
    };

    let mut second_half = WallData::new(corner, far_end, thickness, height);
    second_half.front_texture = front_texture;
    second_half.back_texture = back_texture;
    let new_wall = plan.add_wall(second_half)?;
    plan.emit(&PlanEvent::WallAdded(new_wall));

    set_wall_end(plan, wall, corner)
}

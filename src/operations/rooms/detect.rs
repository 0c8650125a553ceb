use std::collections::HashSet;

use tracing::warn;

use crate::error::Result;
use crate::math::angle_2d::clockwise_angle_2pi;
use crate::math::polygon_2d::is_clockwise;
use crate::math::Point2;
use crate::plan::{CornerId, FloorPlan};

/// Detects the enclosed rooms of the plan as counter-clockwise corner
/// cycles.
///
/// For every (corner, adjacent-corner) seed pair a tightest-cycle walk is
/// run; duplicate cycles are removed by canonicalizing rotations to a
/// joined-uuid key; cycles shorter than three corners and clockwise
/// cycles (the outside face) are discarded. Assumes a planar,
/// non-self-intersecting wall graph.
///
/// # Errors
///
/// Returns an error if the adjacency lists reference stale entities.
pub fn find_rooms(plan: &FloorPlan) -> Result<Vec<Vec<CornerId>>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut rooms: Vec<Vec<CornerId>> = Vec::new();

    for first in plan.corner_ids() {
        for second in plan.adjacent_corners(first)? {
            let Some(cycle) = find_tightest_cycle(plan, first, second)? else {
                continue;
            };
            if cycle.len() < 3 {
                continue;
            }
            if !seen.insert(canonical_key(plan, &cycle)?) {
                continue;
            }

            let mut points: Vec<Point2> = Vec::with_capacity(cycle.len());
            for &corner in &cycle {
                points.push(plan.corner(corner)?.position);
            }
            // Clockwise cycles trace the outside face.
            if is_clockwise(&points) {
                continue;
            }
            rooms.push(cycle);
        }
    }
    Ok(rooms)
}

/// Walks the graph from the seed edge `first`→`second`, always preferring
/// the tightest counter-clockwise turn, until the walk returns to
/// `first`. This completes the smallest face enclosing the seed edge.
///
/// The walk is a depth-first search over an explicit stack; each frame
/// records its depth so a single path buffer can be truncated instead of
/// copied per candidate. The search abandons the seed (with a warning)
/// when the configured step budget runs out.
fn find_tightest_cycle(
    plan: &FloorPlan,
    first: CornerId,
    second: CornerId,
) -> Result<Option<Vec<CornerId>>> {
    let budget = plan.config().room_search_budget;
    let max_corners = plan.config().max_room_corners;

    let mut steps = 0_usize;
    let mut visited: HashSet<CornerId> = HashSet::new();
    visited.insert(first);

    let mut stack: Vec<(CornerId, usize)> = vec![(second, 1)];
    let mut path: Vec<CornerId> = vec![first];
    let mut candidates: Vec<(f64, CornerId)> = Vec::new();

    while let Some((current, depth)) = stack.pop() {
        steps += 1;
        if steps > budget {
            warn!(budget, "room search budget exhausted, abandoning seed");
            return Ok(None);
        }

        path.truncate(depth);
        if current == first {
            // Closed the loop; the path holds the cycle without the
            // repeated seed corner.
            return Ok(Some(path.clone()));
        }
        if depth >= max_corners {
            continue;
        }
        visited.insert(current);
        path.push(current);

        let current_pos = plan.corner(current)?.position;
        let back = plan.corner(path[depth - 1])?.position - current_pos;

        // Candidates: unvisited neighbors, plus the seed corner when it
        // would close a loop of at least three corners (closing back
        // across the seed edge itself is excluded).
        candidates.clear();
        for neighbor in plan.adjacent_corners(current)? {
            if neighbor == first {
                if depth < 2 {
                    continue;
                }
            } else if visited.contains(&neighbor) {
                continue;
            }
            let out = plan.corner(neighbor)?.position - current_pos;
            candidates.push((clockwise_angle_2pi(&back, &out), neighbor));
        }

        // Smallest clockwise angle = tightest counter-clockwise turn.
        // Push in descending order so the tightest turn pops first.
        candidates
            .sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        for &(_, neighbor) in &candidates {
            stack.push((neighbor, depth + 1));
        }
    }
    Ok(None)
}

/// Rotation-independent cycle key: the cycle rotated to start at its
/// lexicographically smallest corner uuid, joined with commas.
fn canonical_key(plan: &FloorPlan, cycle: &[CornerId]) -> Result<String> {
    let mut uuids: Vec<&str> = Vec::with_capacity(cycle.len());
    for &corner in cycle {
        uuids.push(&plan.corner(corner)?.uuid);
    }
    let mut start = 0;
    for (i, uuid) in uuids.iter().enumerate().skip(1) {
        if *uuid < uuids[start] {
            start = i;
        }
    }
    uuids.rotate_left(start);
    Ok(uuids.join(","))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::PlanConfig;
    use crate::plan::{CornerData, WallData};

    fn corner_at(plan: &mut FloorPlan, uuid: &str, x: f64, y: f64) -> CornerId {
        plan.add_corner(CornerData::new(uuid.into(), Point2::new(x, y)))
    }

    fn wall(plan: &mut FloorPlan, a: CornerId, b: CornerId) {
        plan.add_wall(WallData::new(a, b, 0.1, 2.5)).unwrap();
    }

    /// A(0,0) B(4,0) C(4,3) D(0,3) joined A-B, B-C, C-D, D-A.
    fn square(plan: &mut FloorPlan) -> [CornerId; 4] {
        let a = corner_at(plan, "a", 0.0, 0.0);
        let b = corner_at(plan, "b", 4.0, 0.0);
        let c = corner_at(plan, "c", 4.0, 3.0);
        let d = corner_at(plan, "d", 0.0, 3.0);
        wall(plan, a, b);
        wall(plan, b, c);
        wall(plan, c, d);
        wall(plan, d, a);
        [a, b, c, d]
    }

    #[test]
    fn square_yields_one_ccw_room() {
        let mut plan = FloorPlan::default();
        let [a, b, c, d] = square(&mut plan);

        let rooms = find_rooms(&plan).unwrap();
        assert_eq!(rooms.len(), 1);

        let cycle = &rooms[0];
        assert_eq!(cycle.len(), 4);
        let points: Vec<Point2> = cycle
            .iter()
            .map(|&id| plan.corner(id).unwrap().position)
            .collect();
        assert!(!is_clockwise(&points));

        // Same cycle as [a, b, c, d] under rotation.
        let start = cycle.iter().position(|&id| id == a).unwrap();
        let rotated: Vec<CornerId> = (0..4).map(|i| cycle[(start + i) % 4]).collect();
        assert_eq!(rotated, vec![a, b, c, d]);
    }

    #[test]
    fn square_with_diagonal_yields_two_triangles() {
        let mut plan = FloorPlan::default();
        let [a, _b, c, _d] = square(&mut plan);
        wall(&mut plan, a, c);

        let mut rooms = find_rooms(&plan).unwrap();
        rooms.sort_by_key(Vec::len);
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].len(), 3);
        assert_eq!(rooms[1].len(), 3);

        for cycle in &rooms {
            let points: Vec<Point2> = cycle
                .iter()
                .map(|&id| plan.corner(id).unwrap().position)
                .collect();
            assert!(!is_clockwise(&points));
        }
    }

    #[test]
    fn open_polyline_has_no_rooms() {
        let mut plan = FloorPlan::default();
        let a = corner_at(&mut plan, "a", 0.0, 0.0);
        let b = corner_at(&mut plan, "b", 4.0, 0.0);
        let c = corner_at(&mut plan, "c", 4.0, 3.0);
        wall(&mut plan, a, b);
        wall(&mut plan, b, c);

        assert!(find_rooms(&plan).unwrap().is_empty());
    }

    #[test]
    fn exhausted_budget_abandons_seed() {
        let mut plan = FloorPlan::new(PlanConfig {
            room_search_budget: 0,
            ..PlanConfig::default()
        });
        square(&mut plan);
        assert!(find_rooms(&plan).unwrap().is_empty());
    }

    #[test]
    fn two_adjacent_rooms_share_a_wall() {
        // Two squares side by side sharing the middle wall.
        let mut plan = FloorPlan::default();
        let a = corner_at(&mut plan, "a", 0.0, 0.0);
        let b = corner_at(&mut plan, "b", 4.0, 0.0);
        let c = corner_at(&mut plan, "c", 8.0, 0.0);
        let d = corner_at(&mut plan, "d", 8.0, 3.0);
        let e = corner_at(&mut plan, "e", 4.0, 3.0);
        let f = corner_at(&mut plan, "f", 0.0, 3.0);
        wall(&mut plan, a, b);
        wall(&mut plan, b, c);
        wall(&mut plan, c, d);
        wall(&mut plan, d, e);
        wall(&mut plan, e, f);
        wall(&mut plan, f, a);
        wall(&mut plan, b, e);

        let rooms = find_rooms(&plan).unwrap();
        assert_eq!(rooms.len(), 2);
        for cycle in &rooms {
            assert_eq!(cycle.len(), 4);
        }
    }
}

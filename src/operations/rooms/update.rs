use std::collections::HashSet;

use tracing::debug;

use crate::error::Result;
use crate::plan::{FloorPlan, PlanEvent};

use super::{assemble, detect};

/// Rebuilds the plan's derived state after a structural mutation.
///
/// Every existing room and half-edge is discarded and reconstructed from
/// the corner/wall graph; nothing is patched incrementally. Floor
/// textures keyed by room uuids that no longer exist are dropped, and
/// subscribers are notified once at the end.
///
/// # Errors
///
/// Returns [`TopologyError::StructuralInconsistency`](crate::error::TopologyError)
/// if a detected cycle has a corner pair with no connecting wall, or a
/// geometry error for degenerate wall segments.
pub fn update(plan: &mut FloorPlan) -> Result<()> {
    for wall_id in plan.wall_ids() {
        plan.wall_mut(wall_id)?.reset_front_back();
    }
    plan.clear_edges();
    plan.set_rooms(Vec::new());

    let cycles = detect::find_rooms(plan)?;
    let mut rooms = Vec::with_capacity(cycles.len());
    for cycle in cycles {
        rooms.push(assemble::build_room(plan, cycle)?);
    }
    plan.set_rooms(rooms);

    assemble::assign_orphan_edges(plan)?;

    let live: HashSet<String> = plan.rooms().iter().map(|r| r.uuid.clone()).collect();
    plan.retain_floor_textures(|uuid, _| live.contains(uuid));

    debug!(rooms = plan.rooms().len(), "rooms rebuilt");
    plan.emit(&PlanEvent::RoomsUpdated);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::math::Point2;
    use crate::plan::{CornerData, CornerId, FloorPlan, FloorTexture, PlanEvent, WallData};

    fn corner_at(plan: &mut FloorPlan, uuid: &str, x: f64, y: f64) -> CornerId {
        plan.add_corner(CornerData::new(uuid.into(), Point2::new(x, y)))
    }

    fn square(plan: &mut FloorPlan) -> [CornerId; 4] {
        let a = corner_at(plan, "a", 0.0, 0.0);
        let b = corner_at(plan, "b", 4.0, 0.0);
        let c = corner_at(plan, "c", 4.0, 3.0);
        let d = corner_at(plan, "d", 0.0, 3.0);
        for (s, e) in [(a, b), (b, c), (c, d), (d, a)] {
            plan.add_wall(WallData::new(s, e, 0.1, 2.5)).unwrap();
        }
        [a, b, c, d]
    }

    #[test]
    fn update_builds_rooms_and_notifies() {
        let mut plan = FloorPlan::default();
        square(&mut plan);

        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        plan.subscribe(move |ev| {
            if *ev == PlanEvent::RoomsUpdated {
                counter.set(counter.get() + 1);
            }
        });

        plan.update().unwrap();
        assert_eq!(plan.rooms().len(), 1);
        assert_eq!(fired.get(), 1);

        // Every wall face is claimed, no orphans.
        for (_, wall) in plan.walls() {
            assert!(!wall.orphan);
            assert!(wall.front_edge.is_some() || wall.back_edge.is_some());
        }
    }

    #[test]
    fn update_rebuilds_from_scratch() {
        let mut plan = FloorPlan::default();
        square(&mut plan);
        plan.update().unwrap();
        let first_ring = plan.rooms()[0].edge_ring.clone();

        plan.update().unwrap();
        let second_ring = plan.rooms()[0].edge_ring.clone();

        // Half-edges are recreated, never reused.
        for edge in first_ring {
            assert!(plan.edge(edge).is_err());
        }
        assert_eq!(second_ring.len(), 4);
    }

    #[test]
    fn dangling_wall_is_orphaned() {
        let mut plan = FloorPlan::default();
        let [_, b, _, _] = square(&mut plan);
        let x = corner_at(&mut plan, "x", 6.0, -2.0);
        let w = plan.add_wall(WallData::new(b, x, 0.1, 2.5)).unwrap();

        plan.update().unwrap();

        let wall = plan.wall(w).unwrap();
        assert!(wall.orphan);
        assert!(wall.front_edge.is_some() && wall.back_edge.is_some());
    }

    #[test]
    fn stale_floor_textures_are_dropped() {
        let mut plan = FloorPlan::default();
        square(&mut plan);
        plan.update().unwrap();

        let room_uuid = plan.rooms()[0].uuid.clone();
        let texture = FloorTexture {
            url: "textures/hardwood.png".into(),
            scale: 1.0,
            width: 2.0,
            height: 2.0,
        };
        plan.set_floor_texture(room_uuid.clone(), texture.clone());
        plan.set_floor_texture("gone,room", texture);

        plan.update().unwrap();
        assert!(plan.floor_texture(&room_uuid).is_some());
        assert!(plan.floor_texture("gone,room").is_none());
    }
}

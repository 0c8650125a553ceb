use crate::error::{Result, TopologyError};
use crate::math::Point2;
use crate::plan::half_edge::{half_angle_vector, HalfEdgeData};
use crate::plan::{CornerId, EdgeId, FloorPlan, RoomData};

/// Binds a detected CCW corner cycle into a room: creates one half-edge
/// per consecutive corner pair, links them into a circular ring, runs
/// the miter pass and collects the interior outline.
pub(crate) fn build_room(plan: &mut FloorPlan, cycle: Vec<CornerId>) -> Result<RoomData> {
    let n = cycle.len();
    let mut ring: Vec<EdgeId> = Vec::with_capacity(n);

    for i in 0..n {
        let a = cycle[i];
        let b = cycle[(i + 1) % n];

        // The directed wall a→b claims its front face, the reverse wall
        // claims its back face.
        let (wall_id, front) = if let Some(w) = plan.wall_to(a, b)? {
            (w, true)
        } else if let Some(w) = plan.wall_from(a, b)? {
            (w, false)
        } else {
            return Err(TopologyError::StructuralInconsistency {
                corner1: plan.corner(a)?.uuid.clone(),
                corner2: plan.corner(b)?.uuid.clone(),
            }
            .into());
        };

        let (thickness, height) = {
            let wall = plan.wall(wall_id)?;
            (wall.thickness, wall.height)
        };
        let edge = plan.add_edge(HalfEdgeData::new(wall_id, front, thickness / 2.0, height));
        let wall = plan.wall_mut(wall_id)?;
        if front {
            wall.front_edge = Some(edge);
        } else {
            wall.back_edge = Some(edge);
        }
        ring.push(edge);
    }

    // Close the circular doubly-linked ring.
    for i in 0..n {
        let edge = plan.edge_mut(ring[i])?;
        edge.prev = Some(ring[(i + n - 1) % n]);
        edge.next = Some(ring[(i + 1) % n]);
    }

    for &edge in &ring {
        compute_edge_geometry(plan, edge)?;
    }

    // One walk of the ring collects the floor outline.
    let mut interior_corners = Vec::with_capacity(n);
    for &edge in &ring {
        interior_corners.push(plan.edge(edge)?.interior_start);
    }

    let mut corner_uuids: Vec<&str> = Vec::with_capacity(n);
    for &corner in &cycle {
        corner_uuids.push(&plan.corner(corner)?.uuid);
    }
    let uuid = RoomData::uuid_for(&corner_uuids);

    Ok(RoomData {
        uuid,
        corners: cycle,
        edge_ring: ring,
        interior_corners,
    })
}

/// Walls claimed by no room are marked orphan and given two standalone
/// half-edges so they still render with two visible faces.
pub(crate) fn assign_orphan_edges(plan: &mut FloorPlan) -> Result<()> {
    for wall_id in plan.wall_ids() {
        let (claimed, thickness, height) = {
            let wall = plan.wall(wall_id)?;
            (
                wall.front_edge.is_some() || wall.back_edge.is_some(),
                wall.thickness,
                wall.height,
            )
        };
        if claimed {
            continue;
        }

        let front = plan.add_edge(HalfEdgeData::new(wall_id, true, thickness / 2.0, height));
        let back = plan.add_edge(HalfEdgeData::new(wall_id, false, thickness / 2.0, height));
        {
            let wall = plan.wall_mut(wall_id)?;
            wall.orphan = true;
            wall.front_edge = Some(front);
            wall.back_edge = Some(back);
        }
        compute_edge_geometry(plan, front)?;
        compute_edge_geometry(plan, back)?;
    }
    Ok(())
}

/// The edge's oriented segment: front edges run start→end along their
/// wall, back edges end→start.
fn edge_segment(plan: &FloorPlan, edge: EdgeId) -> Result<(Point2, Point2)> {
    let e = plan.edge(edge)?;
    let (start, end) = plan.wall_span(e.wall)?;
    Ok(if e.front { (start, end) } else { (end, start) })
}

/// Computes the four mitered footprint points of an edge from its ring
/// neighbors (or synthetic extensions at open ends) and caches them on
/// the edge.
fn compute_edge_geometry(plan: &mut FloorPlan, edge: EdgeId) -> Result<()> {
    let (start, end) = edge_segment(plan, edge)?;
    let (offset, prev, next) = {
        let e = plan.edge(edge)?;
        (e.offset, e.prev, e.next)
    };
    let prev_segment = match prev {
        Some(p) => Some(edge_segment(plan, p)?),
        None => None,
    };
    let next_segment = match next {
        Some(nx) => Some(edge_segment(plan, nx)?),
        None => None,
    };

    let at_start = half_angle_vector(prev_segment, Some((start, end)), offset)?;
    let at_end = half_angle_vector(Some((start, end)), next_segment, offset)?;

    let e = plan.edge_mut(edge)?;
    e.interior_start = start + at_start;
    e.interior_end = end + at_end;
    e.exterior_start = start - at_start;
    e.exterior_end = end - at_end;
    Ok(())
}

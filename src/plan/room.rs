use serde::{Deserialize, Serialize};

use crate::math::Point2;

use super::corner::CornerId;
use super::half_edge::EdgeId;

/// Floor covering of a room, keyed by room uuid in the plan. Part of the
/// persisted JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorTexture {
    pub url: String,
    pub scale: f64,
    pub width: f64,
    pub height: f64,
}

/// A detected enclosed polygon: an ordered counter-clockwise cycle of
/// corners bound into a circular half-edge ring.
///
/// Rooms are fully rebuilt on every update and never patched in place.
#[derive(Debug, Clone)]
pub struct RoomData {
    /// Sorted, comma-joined corner uuids. Stable across updates for an
    /// unchanged corner set, which keys the floor-texture map.
    pub uuid: String,
    /// The CCW corner cycle.
    pub corners: Vec<CornerId>,
    /// Half-edges in ring order; `edge_ring[i]` runs from `corners[i]`
    /// to the next corner in the cycle.
    pub edge_ring: Vec<EdgeId>,
    /// Mitered interior outline, one point per ring edge.
    pub interior_corners: Vec<Point2>,
}

impl RoomData {
    /// Builds the room uuid for a corner cycle: the corner uuids sorted
    /// and joined with commas, so the key is rotation-independent.
    #[must_use]
    pub fn uuid_for(corner_uuids: &[&str]) -> String {
        let mut ids: Vec<&str> = corner_uuids.to_vec();
        ids.sort_unstable();
        ids.join(",")
    }
}

use crate::math::Point2;

use super::wall::WallId;

slotmap::new_key_type! {
    /// Unique identifier for a corner in the floor plan.
    pub struct CornerId;
}

/// Data associated with a corner (a planar vertex of the wall graph).
#[derive(Debug, Clone)]
pub struct CornerData {
    /// Stable string id, preserved across save/load.
    pub uuid: String,
    /// Position in meters.
    pub position: Point2,
    /// Walls that start at this corner.
    pub wall_starts: Vec<WallId>,
    /// Walls that end at this corner.
    pub wall_ends: Vec<WallId>,
    /// Locked corners are not moved by [`SetWallLength`](crate::operations::modification::SetWallLength).
    pub locked: bool,
}

impl CornerData {
    /// Creates a detached corner at the given position.
    #[must_use]
    pub fn new(uuid: String, position: Point2) -> Self {
        Self {
            uuid,
            position,
            wall_starts: Vec::new(),
            wall_ends: Vec::new(),
            locked: false,
        }
    }

    /// All walls attached to this corner, starting ones first.
    #[must_use]
    pub fn attached_walls(&self) -> Vec<WallId> {
        let mut walls = self.wall_starts.clone();
        walls.extend_from_slice(&self.wall_ends);
        walls
    }

    /// A corner with no attached walls is implicitly deleted.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.wall_starts.is_empty() && self.wall_ends.is_empty()
    }
}

use serde::{Deserialize, Serialize};

use crate::math::Point2;

use super::corner::CornerId;
use super::half_edge::EdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a wall in the floor plan.
    pub struct WallId;
}

/// Texture applied to one face of a wall. Part of the persisted JSON
/// contract, so field names and shape are stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallTexture {
    pub url: String,
    pub stretch: bool,
    pub scale: f64,
}

impl Default for WallTexture {
    fn default() -> Self {
        Self {
            url: "textures/wallmap.png".into(),
            stretch: true,
            scale: 0.0,
        }
    }
}

/// An item mounted on a wall (a door, window, picture, ...).
///
/// Items keep their fractional position along the wall when the wall is
/// dragged. They are render-layer state and are not persisted.
#[derive(Debug, Clone)]
pub struct WallItem {
    pub uuid: String,
    pub position: Point2,
    /// Orientation in radians, kept aligned with the wall's angle.
    pub rotation: f64,
}

/// Data associated with a wall (a straight edge between two corners).
#[derive(Debug, Clone)]
pub struct WallData {
    /// Start corner of the wall.
    pub start: CornerId,
    /// End corner of the wall.
    pub end: CornerId,
    pub thickness: f64,
    pub height: f64,
    /// Half-edge rendered on the front face. Reassigned on every
    /// [`FloorPlan::update`](crate::plan::FloorPlan::update), never persisted.
    pub front_edge: Option<EdgeId>,
    /// Half-edge rendered on the back face. Reassigned on every update.
    pub back_edge: Option<EdgeId>,
    pub front_texture: WallTexture,
    pub back_texture: WallTexture,
    pub locked: bool,
    /// True when no detected room claimed either face.
    pub orphan: bool,
    pub items: Vec<WallItem>,
}

impl WallData {
    /// Creates a wall between two corners with the given dimensions.
    #[must_use]
    pub fn new(start: CornerId, end: CornerId, thickness: f64, height: f64) -> Self {
        Self {
            start,
            end,
            thickness,
            height,
            front_edge: None,
            back_edge: None,
            front_texture: WallTexture::default(),
            back_texture: WallTexture::default(),
            locked: false,
            orphan: false,
            items: Vec::new(),
        }
    }

    /// Clears the per-update face assignments. Invoked once per update
    /// before room reconstruction.
    pub fn reset_front_back(&mut self) {
        self.front_edge = None;
        self.back_edge = None;
        self.orphan = false;
    }

    /// Returns the corner opposite `corner`, or `None` if the corner is
    /// not an endpoint of this wall.
    #[must_use]
    pub fn other_corner(&self, corner: CornerId) -> Option<CornerId> {
        if corner == self.start {
            Some(self.end)
        } else if corner == self.end {
            Some(self.start)
        } else {
            None
        }
    }
}

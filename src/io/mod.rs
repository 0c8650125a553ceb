//! JSON persistence for floor plans.
//!
//! The document shape is the stable interchange contract: corners keyed
//! by uuid, walls referencing corner uuids, and floor textures keyed by
//! room uuid. Ids, half-edges and rooms are derived state and are not
//! persisted; a load rebuilds them with a single update.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OperationError, Result};
use crate::math::Point2;
use crate::plan::{CornerData, FloorPlan, FloorTexture, WallData, WallTexture};

/// Persisted position of a corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerEntry {
    pub x: f64,
    pub y: f64,
}

/// Persisted wall: endpoint uuids plus the two face textures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallEntry {
    pub corner1: String,
    pub corner2: String,
    #[serde(rename = "frontTexture", default)]
    pub front_texture: WallTexture,
    #[serde(rename = "backTexture", default)]
    pub back_texture: WallTexture,
}

/// The complete persisted form of a floor plan.
///
/// `BTreeMap` keeps serialized output deterministic, so saving the same
/// plan twice produces identical documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub corners: BTreeMap<String, CornerEntry>,
    #[serde(default)]
    pub walls: Vec<WallEntry>,
    #[serde(rename = "newFloorTextures", default)]
    pub new_floor_textures: BTreeMap<String, FloorTexture>,
}

/// Captures the plan's persistent state into a document.
///
/// # Errors
///
/// Returns an error if a wall references a stale corner.
pub fn save_floorplan(plan: &FloorPlan) -> Result<PlanDocument> {
    let mut document = PlanDocument::default();

    for (_, corner) in plan.corners() {
        document.corners.insert(
            corner.uuid.clone(),
            CornerEntry {
                x: corner.position.x,
                y: corner.position.y,
            },
        );
    }

    for (_, wall) in plan.walls() {
        document.walls.push(WallEntry {
            corner1: plan.corner(wall.start)?.uuid.clone(),
            corner2: plan.corner(wall.end)?.uuid.clone(),
            front_texture: wall.front_texture.clone(),
            back_texture: wall.back_texture.clone(),
        });
    }
    // Wall order follows arena iteration; sort by endpoint uuids so the
    // document does not depend on insertion history.
    document
        .walls
        .sort_by(|a, b| (&a.corner1, &a.corner2).cmp(&(&b.corner1, &b.corner2)));

    for (room_uuid, texture) in plan.floor_textures() {
        document
            .new_floor_textures
            .insert(room_uuid.clone(), texture.clone());
    }

    Ok(document)
}

/// Replaces the plan's contents with the document's.
///
/// Corners are recreated under their persisted uuids, walls reconnect by
/// uuid, floor textures are restored, and a single update rebuilds rooms
/// and geometry. Subscriptions survive the load.
///
/// # Errors
///
/// Returns an error if a wall references an unknown corner uuid, or the
/// rebuild fails.
pub fn load_floorplan(plan: &mut FloorPlan, document: &PlanDocument) -> Result<()> {
    plan.reset();

    let mut ids = BTreeMap::new();
    for (uuid, entry) in &document.corners {
        let id = plan.add_corner(CornerData::new(
            uuid.clone(),
            Point2::new(entry.x, entry.y),
        ));
        ids.insert(uuid.clone(), id);
    }

    let thickness = plan.config().wall_thickness;
    let height = plan.config().wall_height;
    for entry in &document.walls {
        let resolve = |uuid: &str| {
            ids.get(uuid).copied().ok_or_else(|| {
                OperationError::InvalidInput(format!("wall references unknown corner {uuid}"))
            })
        };
        let start = resolve(&entry.corner1)?;
        let end = resolve(&entry.corner2)?;
        let mut wall = WallData::new(start, end, thickness, height);
        wall.front_texture = entry.front_texture.clone();
        wall.back_texture = entry.back_texture.clone();
        plan.add_wall(wall)?;
    }

    for (room_uuid, texture) in &document.new_floor_textures {
        plan.set_floor_texture(room_uuid.clone(), texture.clone());
    }

    debug!(
        corners = document.corners.len(),
        walls = document.walls.len(),
        "floorplan loaded"
    );
    plan.update()
}

/// Serializes a plan to a JSON string.
///
/// # Errors
///
/// Returns an error if the plan cannot be captured or encoded.
pub fn to_json(plan: &FloorPlan) -> Result<String> {
    let document = save_floorplan(plan)?;
    Ok(serde_json::to_string(&document)?)
}

/// Loads a plan from a JSON string produced by [`to_json`].
///
/// # Errors
///
/// Returns an error if the JSON is malformed or the document is
/// inconsistent.
pub fn from_json(plan: &mut FloorPlan, json: &str) -> Result<()> {
    let document: PlanDocument = serde_json::from_str(json)?;
    load_floorplan(plan, &document)
}

pub mod corner;
pub mod events;
pub mod half_edge;
pub mod room;
pub mod wall;

pub use corner::{CornerData, CornerId};
pub use events::{EventBus, PlanEvent, Subscription};
pub use half_edge::{EdgeId, HalfEdgeData};
pub use room::{FloorTexture, RoomData};
pub use wall::{WallData, WallId, WallItem, WallTexture};

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::config::PlanConfig;
use crate::error::{Result, TopologyError};
use crate::math::Point2;

/// Central arena that owns every entity of the floor plan.
///
/// Entities reference each other via typed ids (generational indices),
/// avoiding self-referential structures and enabling safe mutation.
/// Structural edits go through the command structs in
/// [`operations`](crate::operations); each of them ends by calling
/// [`update`](FloorPlan::update), which rebuilds rooms and half-edges
/// from scratch and notifies subscribers.
#[derive(Debug)]
pub struct FloorPlan {
    config: PlanConfig,
    corners: SlotMap<CornerId, CornerData>,
    walls: SlotMap<WallId, WallData>,
    edges: SlotMap<EdgeId, HalfEdgeData>,
    rooms: Vec<RoomData>,
    floor_textures: HashMap<String, FloorTexture>,
    events: EventBus,
}

impl Default for FloorPlan {
    fn default() -> Self {
        Self::new(PlanConfig::default())
    }
}

impl FloorPlan {
    /// Creates an empty plan with the given configuration.
    #[must_use]
    pub fn new(config: PlanConfig) -> Self {
        Self {
            config,
            corners: SlotMap::with_key(),
            walls: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            rooms: Vec::new(),
            floor_textures: HashMap::new(),
            events: EventBus::default(),
        }
    }

    /// The plan's configuration.
    #[must_use]
    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Removes every entity from the plan. Subscriptions survive.
    pub fn reset(&mut self) {
        self.corners.clear();
        self.walls.clear();
        self.edges.clear();
        self.rooms.clear();
        self.floor_textures.clear();
    }

    /// Rebuilds rooms, half-edge rings and mitered geometry, then fires
    /// [`PlanEvent::RoomsUpdated`]. Called by every structural mutation.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::StructuralInconsistency`] if a detected
    /// room cycle contains a corner pair with no connecting wall, or a
    /// geometry error if a wall has degenerate length.
    pub fn update(&mut self) -> Result<()> {
        crate::operations::rooms::update(self)
    }

    // --- Corner operations ---

    /// Inserts a corner and returns its id.
    pub fn add_corner(&mut self, data: CornerData) -> CornerId {
        self.corners.insert(data)
    }

    /// Returns a reference to the corner data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the plan.
    pub fn corner(&self, id: CornerId) -> Result<&CornerData, TopologyError> {
        self.corners
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("corner".into()))
    }

    /// Returns a mutable reference to the corner data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the plan.
    pub fn corner_mut(&mut self, id: CornerId) -> Result<&mut CornerData, TopologyError> {
        self.corners
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("corner".into()))
    }

    /// Iterates over all corners.
    pub fn corners(&self) -> impl Iterator<Item = (CornerId, &CornerData)> {
        self.corners.iter()
    }

    /// Ids of all corners, in arena order.
    #[must_use]
    pub fn corner_ids(&self) -> Vec<CornerId> {
        self.corners.keys().collect()
    }

    /// Looks up a corner by its stable string uuid.
    #[must_use]
    pub fn corner_by_uuid(&self, uuid: &str) -> Option<CornerId> {
        self.corners
            .iter()
            .find(|(_, c)| c.uuid == uuid)
            .map(|(id, _)| id)
    }

    /// Corners connected to `id` by a wall, in adjacency-list order.
    ///
    /// # Errors
    ///
    /// Returns an error if the corner or one of its walls is not found.
    pub fn adjacent_corners(&self, id: CornerId) -> Result<Vec<CornerId>, TopologyError> {
        let corner = self.corner(id)?;
        let mut adjacent = Vec::with_capacity(corner.wall_starts.len() + corner.wall_ends.len());
        for &wall_id in &corner.wall_starts {
            adjacent.push(self.wall(wall_id)?.end);
        }
        for &wall_id in &corner.wall_ends {
            adjacent.push(self.wall(wall_id)?.start);
        }
        Ok(adjacent)
    }

    pub(crate) fn remove_corner_entity(&mut self, id: CornerId) -> Option<CornerData> {
        self.corners.remove(id)
    }

    // --- Wall operations ---

    /// Inserts a wall and registers it in both corners' adjacency lists.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is not found or the wall is a
    /// self-loop.
    pub fn add_wall(&mut self, data: WallData) -> Result<WallId, TopologyError> {
        if data.start == data.end {
            return Err(TopologyError::InvalidTopology(
                "wall endpoints must be distinct corners".into(),
            ));
        }
        self.corner(data.start)?;
        self.corner(data.end)?;

        let start = data.start;
        let end = data.end;
        let id = self.walls.insert(data);
        self.corner_mut(start)?.wall_starts.push(id);
        self.corner_mut(end)?.wall_ends.push(id);
        Ok(id)
    }

    /// Returns a reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the plan.
    pub fn wall(&self, id: WallId) -> Result<&WallData, TopologyError> {
        self.walls
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("wall".into()))
    }

    /// Returns a mutable reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the plan.
    pub fn wall_mut(&mut self, id: WallId) -> Result<&mut WallData, TopologyError> {
        self.walls
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("wall".into()))
    }

    /// Iterates over all walls.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &WallData)> {
        self.walls.iter()
    }

    /// Ids of all walls, in arena order.
    #[must_use]
    pub fn wall_ids(&self) -> Vec<WallId> {
        self.walls.keys().collect()
    }

    /// The directed wall running from `from` to `to`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found.
    pub fn wall_to(&self, from: CornerId, to: CornerId) -> Result<Option<WallId>, TopologyError> {
        for &wall_id in &self.corner(from)?.wall_starts {
            if self.wall(wall_id)?.end == to {
                return Ok(Some(wall_id));
            }
        }
        Ok(None)
    }

    /// The reverse wall, running from `to` to `from`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found.
    pub fn wall_from(&self, from: CornerId, to: CornerId) -> Result<Option<WallId>, TopologyError> {
        self.wall_to(to, from)
    }

    /// The wall's uuid, derived from its endpoint uuids.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall or an endpoint is not found.
    pub fn wall_uuid(&self, id: WallId) -> Result<String, TopologyError> {
        let wall = self.wall(id)?;
        let start = self.corner(wall.start)?;
        let end = self.corner(wall.end)?;
        Ok(format!("{},{}", start.uuid, end.uuid))
    }

    /// Start and end positions of a wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall or an endpoint is not found.
    pub fn wall_span(&self, id: WallId) -> Result<(Point2, Point2), TopologyError> {
        let wall = self.wall(id)?;
        Ok((
            self.corner(wall.start)?.position,
            self.corner(wall.end)?.position,
        ))
    }

    /// Removes `wall` from `corner`'s adjacency lists. Returns true when
    /// the corner is left with no attached walls.
    ///
    /// # Errors
    ///
    /// Returns an error if the corner is not found.
    pub(crate) fn detach_wall(
        &mut self,
        corner: CornerId,
        wall: WallId,
    ) -> Result<bool, TopologyError> {
        let data = self.corner_mut(corner)?;
        data.wall_starts.retain(|&w| w != wall);
        data.wall_ends.retain(|&w| w != wall);
        Ok(data.is_detached())
    }

    pub(crate) fn remove_wall_entity(&mut self, id: WallId) -> Option<WallData> {
        self.walls.remove(id)
    }

    // --- Half-edge operations ---

    /// Inserts a half-edge and returns its id.
    pub fn add_edge(&mut self, data: HalfEdgeData) -> EdgeId {
        self.edges.insert(data)
    }

    /// Returns a reference to the half-edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the plan.
    pub fn edge(&self, id: EdgeId) -> Result<&HalfEdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("half-edge".into()))
    }

    /// Returns a mutable reference to the half-edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the plan.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut HalfEdgeData, TopologyError> {
        self.edges
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("half-edge".into()))
    }

    /// The half-edge on the opposite face of the same wall, if assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or its wall is not found.
    pub fn opposite_edge(&self, id: EdgeId) -> Result<Option<EdgeId>, TopologyError> {
        let edge = self.edge(id)?;
        let wall = self.wall(edge.wall)?;
        Ok(if edge.front {
            wall.back_edge
        } else {
            wall.front_edge
        })
    }

    pub(crate) fn clear_edges(&mut self) {
        self.edges.clear();
    }

    // --- Rooms and floor textures ---

    /// The rooms detected by the last update.
    #[must_use]
    pub fn rooms(&self) -> &[RoomData] {
        &self.rooms
    }

    pub(crate) fn set_rooms(&mut self, rooms: Vec<RoomData>) {
        self.rooms = rooms;
    }

    /// Assigns a floor texture to a room uuid.
    pub fn set_floor_texture(&mut self, room_uuid: impl Into<String>, texture: FloorTexture) {
        self.floor_textures.insert(room_uuid.into(), texture);
    }

    /// The floor texture assigned to a room uuid, if any.
    #[must_use]
    pub fn floor_texture(&self, room_uuid: &str) -> Option<&FloorTexture> {
        self.floor_textures.get(room_uuid)
    }

    /// All floor-texture assignments.
    #[must_use]
    pub fn floor_textures(&self) -> &HashMap<String, FloorTexture> {
        &self.floor_textures
    }

    pub(crate) fn retain_floor_textures<F>(&mut self, keep: F)
    where
        F: FnMut(&String, &mut FloorTexture) -> bool,
    {
        self.floor_textures.retain(keep);
    }

    // --- Events ---

    /// Registers a change listener and returns its subscription handle.
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&PlanEvent) + 'static,
    {
        self.events.subscribe(listener)
    }

    /// Removes a change listener.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.events.unsubscribe(subscription);
    }

    pub(crate) fn emit(&mut self, event: &PlanEvent) {
        self.events.emit(event);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn corner_at(plan: &mut FloorPlan, uuid: &str, x: f64, y: f64) -> CornerId {
        plan.add_corner(CornerData::new(uuid.into(), Point2::new(x, y)))
    }

    #[test]
    fn add_wall_registers_adjacency() {
        let mut plan = FloorPlan::default();
        let a = corner_at(&mut plan, "a", 0.0, 0.0);
        let b = corner_at(&mut plan, "b", 4.0, 0.0);
        let w = plan.add_wall(WallData::new(a, b, 0.1, 2.5)).unwrap();

        assert_eq!(plan.corner(a).unwrap().wall_starts, vec![w]);
        assert_eq!(plan.corner(b).unwrap().wall_ends, vec![w]);
        assert_eq!(plan.wall_to(a, b).unwrap(), Some(w));
        assert_eq!(plan.wall_from(b, a).unwrap(), Some(w));
        assert_eq!(plan.wall_to(b, a).unwrap(), None);
        assert_eq!(plan.adjacent_corners(a).unwrap(), vec![b]);
    }

    #[test]
    fn self_loop_wall_is_rejected() {
        let mut plan = FloorPlan::default();
        let a = corner_at(&mut plan, "a", 0.0, 0.0);
        assert!(plan.add_wall(WallData::new(a, a, 0.1, 2.5)).is_err());
    }

    #[test]
    fn stale_id_is_an_error() {
        let mut plan = FloorPlan::default();
        let a = corner_at(&mut plan, "a", 0.0, 0.0);
        plan.remove_corner_entity(a);
        assert!(plan.corner(a).is_err());
    }

    #[test]
    fn wall_uuid_joins_endpoint_uuids() {
        let mut plan = FloorPlan::default();
        let a = corner_at(&mut plan, "a", 0.0, 0.0);
        let b = corner_at(&mut plan, "b", 4.0, 0.0);
        let w = plan.add_wall(WallData::new(a, b, 0.1, 2.5)).unwrap();
        assert_eq!(plan.wall_uuid(w).unwrap(), "a,b");
    }

    #[test]
    fn corner_lookup_by_uuid() {
        let mut plan = FloorPlan::default();
        let a = corner_at(&mut plan, "a", 1.0, 2.0);
        assert_eq!(plan.corner_by_uuid("a"), Some(a));
        assert_eq!(plan.corner_by_uuid("zz"), None);
    }
}

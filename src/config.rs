/// Configuration for a [`FloorPlan`](crate::plan::FloorPlan).
///
/// Replaces process-wide defaults with an explicit value passed in at
/// construction. Distances are in meters.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// Thickness assigned to newly created walls.
    pub wall_thickness: f64,
    /// Height assigned to newly created walls.
    pub wall_height: f64,
    /// Corners closer than this are merged into one.
    pub corner_merge_distance: f64,
    /// A corner closer than this to an unconnected wall snaps onto it
    /// and splits it.
    pub wall_snap_distance: f64,
    /// Axis-alignment snap tolerance against adjacent corners.
    pub axis_snap_tolerance: f64,
    /// Upper bound on stack pops per room-search seed. Degenerate or
    /// dense graphs abandon the seed when the budget runs out.
    pub room_search_budget: usize,
    /// Upper bound on the number of corners in a detected room cycle.
    pub max_room_corners: usize,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            wall_thickness: 0.1,
            wall_height: 2.5,
            corner_merge_distance: 0.2,
            wall_snap_distance: 0.2,
            axis_snap_tolerance: 0.25,
            room_search_budget: 10_000,
            max_room_corners: 64,
        }
    }
}

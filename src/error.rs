use thiserror::Error;

/// Top-level error type for the floor-plan engine.
#[derive(Debug, Error)]
pub enum FloorplanError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the plan's topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// A detected room cycle contains a corner pair with no connecting
    /// wall. Silently skipping the pair would leave a broken edge ring
    /// and a visibly wrong room outline, so `update()` surfaces it.
    #[error("no wall connects corners {corner1} and {corner2} in a room cycle")]
    StructuralInconsistency { corner1: String, corner2: String },

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to editing operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`FloorplanError`].
///
/// The error type can be overridden for functions that can only fail in
/// one way, e.g. `Result<&CornerData, TopologyError>`.
pub type Result<T, E = FloorplanError> = std::result::Result<T, E>;

pub mod config;
pub mod error;
pub mod io;
pub mod math;
pub mod operations;
pub mod plan;

pub use config::PlanConfig;
pub use error::{FloorplanError, Result};
pub use plan::FloorPlan;

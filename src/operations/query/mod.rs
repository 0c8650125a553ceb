
pub use hit_test::{OverlappedCorner, OverlappedWall};

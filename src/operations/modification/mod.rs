mod merge;
mod move_corner;
mod move_wall;
mod remove;
mod wall_length;

pub use merge::{combine_with_corner, merge_with_intersected, remove_duplicate_walls};
pub use move_corner::MoveCorner;
pub use move_wall::MoveWall;
pub use remove::{RemoveCorner, RemoveWall};
pub use wall_length::SetWallLength;

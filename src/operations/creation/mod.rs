mod add_corner;
mod add_wall;

pub use add_corner::AddCorner;
pub use add_wall::AddWall;

mod assemble;
mod detect;
mod update;

pub use detect::find_rooms;
pub use update::update;

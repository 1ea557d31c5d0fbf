pub use cell::{Cell, GridDim};
pub use dir::Dir;

pub mod board;
mod cell;
mod dir;

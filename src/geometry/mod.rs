//! Planar primitives shared by the sweep and the query layer.

mod line;
mod point;
mod segment;

pub use line::Line;
pub use point::{CellKey, Point};
pub use segment::Segment;

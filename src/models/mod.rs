pub mod coordinate;
pub mod table;

pub use coordinate::Coordinate;
pub use table::{CoordinateRow, CoordinateTable};

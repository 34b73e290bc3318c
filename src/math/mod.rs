pub mod geometry;
pub mod orbit;

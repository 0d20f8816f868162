pub mod graph;
pub mod matrix;

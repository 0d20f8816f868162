pub use data_structure::graph::*;
pub use data_structure::matrix::Matrix;
pub use string::{explode, PUNCTUATION, SPACE};

//! Distribution-matrix construction, inversion, and survivor-matrix
//! assembly: the layer that sits above the plain `numeric::Matrix`
//! container.

pub mod constructors;
pub mod inverse;
pub mod repair;

pub use constructors::{cauchy, vandermonde, vandermonde_correct};
pub use inverse::invert;
pub use repair::build_survivor_matrix;

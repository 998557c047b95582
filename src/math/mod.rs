//! Mathematical utilities: sample grids, polynomial evaluation, matrix exponential.

pub mod expm;
pub mod grid;
pub mod polynomial;

pub use expm::*;
pub use grid::*;
pub use polynomial::*;

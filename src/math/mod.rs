//! Mathematical utilities: the Gauss-Seidel solver and fit statistics.

pub mod gauss_seidel;
pub mod stats;

pub use gauss_seidel::*;
pub use stats::*;

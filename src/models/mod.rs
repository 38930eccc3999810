//! Model families (polynomial, exponential, logarithmic, power).
//!
//! Models are plain values so that fitting and selection code can stay generic
//! over the family.

pub mod model;

pub use model::*;

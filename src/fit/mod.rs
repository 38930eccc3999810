//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - build and solve the least-squares system for one model (`fitter`)
//! - score every candidate family and pick the best (`selection`)
//! - bind a model to a dataset and derive phi / epsilon / r (`engine`)

pub mod engine;
pub mod fitter;
pub mod selection;

pub use engine::*;
pub use fitter::*;
pub use selection::*;

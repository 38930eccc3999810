//! `lsq-curves` library crate.
//!
//! The binary (`lsq`) is a thin wrapper around this library so that:
//!
//! - the fitting engine is testable without spawning processes
//! - models, the solver and model selection are reusable on their own
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;

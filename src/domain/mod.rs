//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - validated sample sets (`Samples`) and their stats
//! - fit outputs (`FitReport`, `FitFile`)
//! - run configuration (`FitConfig`, `SampleConfig`)

pub mod types;

pub use types::*;

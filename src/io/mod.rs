//! Input/output helpers.
//!
//! - sample ingest (text + CSV) (`ingest`)
//! - result exports (CSV, sample text) (`export`)
//! - fit JSON read/write (`fit_file`)

pub mod export;
pub mod fit_file;
pub mod ingest;

pub use export::*;
pub use fit_file::*;
pub use ingest::*;

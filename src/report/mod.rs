//! Reporting utilities: run summaries and candidate diagnostics.

pub mod format;

pub use format::*;

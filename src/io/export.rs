//! Export per-sample results to CSV, and samples to the two-line text format.
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{FitReport, Samples};
use crate::error::AppError;

/// Write `i, x, y, phi, epsilon` rows to a CSV file.
pub fn write_results_csv(path: &Path, samples: &Samples, report: &FitReport) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "i,x,y,phi,epsilon")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    let rows = samples
        .x()
        .iter()
        .zip(samples.y())
        .zip(report.phi.iter().zip(&report.epsilon));
    for (i, ((x, y), (phi, eps))) in rows.enumerate() {
        writeln!(file, "{i},{x},{y},{phi:.10},{eps:.10}")
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write samples as two whitespace-separated lines (x then y).
pub fn write_samples_text(path: &Path, samples: &Samples) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create sample file '{}': {e}", path.display())))?;

    file.write_all(format_samples_text(samples).as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to write sample file: {e}")))?;
    Ok(())
}

pub fn format_samples_text(samples: &Samples) -> String {
    let join = |values: &[f64]| {
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!("{}\n{}\n", join(samples.x()), join(samples.y()))
}

//! Formatted terminal output for fit runs.
//!
//! Formatting lives here so the fitting code stays clean and output changes
//! stay localized.

use crate::domain::{DatasetStats, FitReport, Samples};
use crate::error::AppError;
use crate::fit::ModelSelection;

/// Format the full run summary: header, dataset stats, chosen function, r,
/// coefficients and the per-sample table.
///
/// When the correlation carries a caveat, only the caveat is shown after the
/// header.
pub fn format_run_summary(
    timestamp: &str,
    stats: &DatasetStats,
    samples: &Samples,
    report: &FitReport,
) -> Result<String, AppError> {
    let mut out = String::new();

    out.push_str(&format!("=== Approximation result from {timestamp} ===\n"));
    out.push_str(&format!(
        "Points: n={} | x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]\n",
        stats.n_points, stats.x_min, stats.x_max, stats.y_min, stats.y_max
    ));
    out.push('\n');

    if report.correlation.has_note() {
        out.push_str(&report.correlation.note);
        out.push('\n');
        return Ok(out);
    }

    out.push_str(&format!(
        "Best matching function: {} {}\n",
        report.model,
        report.function_string()?
    ));
    out.push_str(&format!("Pearson correlation: {:.6}\n", report.correlation.r));
    out.push_str(&format!("RMSE: {:.6}\n", report.rmse));

    out.push_str("\nCoefficients:\n");
    for (i, c) in report.coefficients.iter().enumerate() {
        out.push_str(&format!("  c{i} = {c:.6}\n"));
    }

    out.push('\n');
    out.push_str(&format_table(samples, report));
    Ok(out)
}

/// Format the candidate diagnostics from model selection.
pub fn format_candidates(selection: &ModelSelection) -> String {
    let mut out = String::new();
    out.push_str("Model diagnostics:\n");
    for fit in &selection.fits {
        let chosen = if fit.model == selection.best.model { "*" } else { " " };
        out.push_str(&format!(
            "{chosen} {:<14} RMSE={:.6}\n",
            fit.model.describe(),
            fit.rmse
        ));
    }
    for (model, reason) in &selection.skipped {
        out.push_str(&format!("  (skipped {model}) {reason}\n"));
    }
    out
}

fn format_table(samples: &Samples, report: &FitReport) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>4} {:>12} {:>12} {:>12} {:>12}\n",
            "i", "x", "y", "phi", "epsilon"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<4} {:-<12} {:-<12} {:-<12} {:-<12}", "", "", "", "", "").trim_end());
    out.push('\n');

    let rows = samples
        .x()
        .iter()
        .zip(samples.y())
        .zip(report.phi.iter().zip(&report.epsilon));
    for (i, ((x, y), (phi, eps))) in rows.enumerate() {
        out.push_str(&format!("{i:>4} {x:>12.4} {y:>12.4} {phi:>12.4} {eps:>12.4}\n"));
    }
    out
}

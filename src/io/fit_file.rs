//! Read/write fit JSON files.
//!
//! A fit file is the portable representation of a fitted function:
//! - model + coefficients + rendered expression
//! - quality (RMSE, correlation) and dataset stats
//! - a precomputed evaluation grid for quick plotting
//!
//! The schema is defined by `domain::FitFile`.

use std::fs::File;
use std::path::Path;

use chrono::Local;

use crate::domain::{DatasetStats, FitFile, FitGrid, FitReport};
use crate::error::AppError;
use crate::models::Model;

/// Points in the saved evaluation grid.
pub const GRID_POINTS: usize = 101;

/// Assemble the fit file contents for a report.
pub fn build_fit_file(report: &FitReport, stats: &DatasetStats) -> Result<FitFile, AppError> {
    let function = report.function_string()?;
    let grid = build_grid(report.model, &report.coefficients, stats.x_min, stats.x_max, GRID_POINTS);

    Ok(FitFile {
        tool: "lsq".to_string(),
        created: Local::now().naive_local(),
        model: report.model,
        function,
        coefficients: report.coefficients.clone(),
        rmse: report.rmse,
        correlation: report.correlation.clone(),
        stats: stats.clone(),
        grid,
    })
}

/// Write a fit JSON file.
pub fn write_fit_json(path: &Path, report: &FitReport, stats: &DatasetStats) -> Result<(), AppError> {
    let fit = build_fit_file(report, stats)?;
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create fit JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &fit)
        .map_err(|e| AppError::new(2, format!("Failed to write fit JSON: {e}")))?;

    Ok(())
}

/// Read a fit JSON file.
pub fn read_fit_json(path: &Path) -> Result<FitFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open fit JSON '{}': {e}", path.display())))?;
    let fit: FitFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid fit JSON: {e}")))?;
    fit.model.check_coefficients(&fit.coefficients)?;
    Ok(fit)
}

/// Evaluate the fitted function on `n` evenly spaced points of `[x_min, x_max]`.
///
/// Points where the function is undefined (e.g. `ln` of a non-positive x) are
/// left out.
pub fn build_grid(model: Model, coefficients: &[f64], x_min: f64, x_max: f64, n: usize) -> FitGrid {
    let n = n.max(2);
    let mut x0 = x_min;
    let mut x1 = x_max;
    if !(x0.is_finite() && x1.is_finite()) || x1 < x0 {
        x0 = 0.0;
        x1 = 1.0;
    }
    if (x1 - x0).abs() < 1e-9 {
        x0 -= 0.5;
        x1 += 0.5;
    }

    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x0 + u * (x1 - x0);
        let y = model.evaluate(coefficients, x);
        if y.is_finite() {
            xs.push(x);
            ys.push(y);
        }
    }

    FitGrid { x: xs, y: ys }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Correlation;

    fn report() -> FitReport {
        FitReport {
            model: Model::polynomial(1),
            coefficients: vec![3.0, 2.0],
            phi: vec![5.0, 7.0],
            epsilon: vec![0.0, 0.0],
            rmse: 0.0,
            correlation: Correlation {
                r: 1.0,
                note: String::new(),
            },
        }
    }

    #[test]
    fn grid_spans_the_sample_range() {
        let grid = build_grid(Model::polynomial(1), &[3.0, 2.0], 1.0, 2.0, 3);
        assert_eq!(grid.x, vec![1.0, 1.5, 2.0]);
        assert_eq!(grid.y, vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn grid_drops_undefined_points() {
        let grid = build_grid(Model::Logarithmic, &[0.0, 1.0], 0.0, 1.0, 3);
        assert_eq!(grid.x, vec![0.5, 1.0]);
    }

    #[test]
    fn fit_file_round_trips_through_json() {
        let stats = DatasetStats {
            n_points: 2,
            x_min: 1.0,
            x_max: 2.0,
            y_min: 5.0,
            y_max: 7.0,
        };
        let dir = std::env::temp_dir().join(format!("lsq-fit-file-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("fit.json");

        write_fit_json(&path, &report(), &stats).unwrap();
        let fit = read_fit_json(&path).unwrap();
        assert_eq!(fit.model, Model::polynomial(1));
        assert_eq!(fit.function, "2.0000x+3.0000");
        assert_eq!(fit.grid.x.len(), GRID_POINTS);

        std::fs::remove_dir_all(&dir).ok();
    }
}

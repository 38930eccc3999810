//! Shared domain types.
//!
//! These are kept small and serializable so they can be:
//!
//! - passed between the fitting core and the presentation layer
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{FitError, Result};
use crate::math::{Correlation, SignificanceGate};
use crate::models::Model;

/// A validated set of `(x, y)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Samples {
    /// Validate equal length, non-emptiness and finiteness.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(FitError::EmptySamples);
        }
        if let Some(idx) = x
            .iter()
            .zip(&y)
            .position(|(xi, yi)| !(xi.is_finite() && yi.is_finite()))
        {
            return Err(FitError::NonFiniteSample(idx));
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn stats(&self) -> DatasetStats {
        let (x_min, x_max) = min_max(&self.x);
        let (y_min, y_max) = min_max(&self.y);
        DatasetStats {
            n_points: self.len(),
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Summary stats about the points actually used for fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Everything one `calculate` run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    pub model: Model,
    pub coefficients: Vec<f64>,
    /// Predicted y at each sample x.
    pub phi: Vec<f64>,
    /// Residuals `y - phi`.
    pub epsilon: Vec<f64>,
    pub rmse: f64,
    pub correlation: Correlation,
}

impl FitReport {
    pub fn function_string(&self) -> Result<String> {
        self.model.render(&self.coefficients)
    }
}

/// Which model the run should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChoice {
    /// Let model selection pick the family with the lowest RMSE.
    Auto,
    Fixed(Model),
}

/// A fit run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub input_path: PathBuf,
    pub model: ModelChoice,
    pub gate: SignificanceGate,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_fit: Option<PathBuf>,
}

/// Settings for synthetic sample generation.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub model: Model,
    pub coefficients: Vec<f64>,
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// Standard deviation of additive Gaussian noise on y.
    pub noise: f64,
    pub seed: u64,
}

/// A saved fit file (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub created: NaiveDateTime,
    pub model: Model,
    pub function: String,
    pub coefficients: Vec<f64>,
    pub rmse: f64,
    pub correlation: Correlation,
    pub stats: DatasetStats,
    pub grid: FitGrid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

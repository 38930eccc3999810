//! Model selection across the built-in candidate families.
//!
//! Every candidate in `Model::CANDIDATES` is fitted and scored by the RMSE of
//! its residuals. Selection rules:
//! 1. Skip candidates whose fit fails (e.g. log families on non-positive data)
//!    or whose RMSE is not finite
//! 2. Choose the minimum RMSE
//! 3. On exact ties keep the earliest candidate (poly1, poly2, poly3, exp, log, pow)

use tracing::debug;

use crate::error::{FitError, Result};
use crate::fit::fitter::{fit_coefficients, residuals};
use crate::math::rmse;
use crate::models::Model;

/// One scored candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFit {
    pub model: Model,
    pub coefficients: Vec<f64>,
    pub rmse: f64,
}

/// Output of fitting + selection.
#[derive(Debug, Clone)]
pub struct ModelSelection {
    pub best: CandidateFit,
    /// Scored candidates in enumeration order.
    pub fits: Vec<CandidateFit>,
    /// Candidates that could not be scored and why (for diagnostics).
    pub skipped: Vec<(Model, FitError)>,
}

/// Pick the family with the smallest residual RMSE.
///
/// Returns only the model: callers refit to get coefficients.
pub fn find_best_function(x: &[f64], y: &[f64]) -> Result<Model> {
    select_model(x, y).map(|selection| selection.best.model)
}

/// Fit and score every candidate, keeping diagnostics.
pub fn select_model(x: &[f64], y: &[f64]) -> Result<ModelSelection> {
    let mut fits = Vec::with_capacity(Model::CANDIDATES.len());
    let mut skipped = Vec::new();

    for model in Model::CANDIDATES {
        match score_candidate(model, x, y) {
            Ok(fit) => {
                debug!(model = %model, rmse = fit.rmse, "scored candidate");
                fits.push(fit);
            }
            Err(err) => {
                debug!(model = %model, error = %err, "skipped candidate");
                skipped.push((model, err));
            }
        }
    }

    let Some(best) = pick_min_rmse(&fits) else {
        // Every candidate failed; the first failure is the most informative.
        let (_, err) = skipped.swap_remove(0);
        return Err(err);
    };

    Ok(ModelSelection {
        best: best.clone(),
        fits,
        skipped,
    })
}

fn score_candidate(model: Model, x: &[f64], y: &[f64]) -> Result<CandidateFit> {
    let coefficients = fit_coefficients(model, x, y)?;
    let eps = residuals(model, &coefficients, x, y)?;
    let rmse = rmse(&eps);
    if !rmse.is_finite() {
        return Err(FitError::NonConvergence(format!(
            "non-finite residuals for {model}"
        )));
    }
    Ok(CandidateFit {
        model,
        coefficients,
        rmse,
    })
}

/// Strict `<` keeps the earliest candidate on ties.
fn pick_min_rmse(fits: &[CandidateFit]) -> Option<&CandidateFit> {
    let mut iter = fits.iter();
    let mut best = iter.next()?;
    for c in iter {
        if c.rmse < best.rmse {
            best = c;
        }
    }
    Some(best)
}

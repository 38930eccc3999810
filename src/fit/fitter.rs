//! Least-squares fitting routines for a single model.
//!
//! Given samples `(x_i, y_i)` and a model:
//! - polynomials build their normal equations directly and solve them with
//!   Gauss-Seidel
//! - exponential, power and logarithmic fits linearize the data with `ln` and
//!   delegate to the degree-1 polynomial fit, then map the intercept back
//!
//! The log families require strictly positive inputs on the transformed axis.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::{FitError, Result};
use crate::math::solve_gauss_seidel;
use crate::models::Model;

/// Fit `model` to the samples and return its coefficient vector.
///
/// Output lengths: `degree + 1` for polynomials (constant term first), 2 for
/// the other families (`[a, b]`).
pub fn fit_coefficients(model: Model, x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.is_empty() {
        return Err(FitError::EmptySamples);
    }

    let coefficients = match model {
        Model::Polynomial { degree } => fit_polynomial(degree, x, y)?,
        Model::Exponential => {
            let ln_y = ln_axis(model, 'y', y)?;
            let mut c = fit_coefficients(Model::polynomial(1), x, &ln_y)?;
            c[0] = c[0].exp();
            c
        }
        Model::Power => {
            let ln_x = ln_axis(model, 'x', x)?;
            let ln_y = ln_axis(model, 'y', y)?;
            let mut c = fit_coefficients(Model::polynomial(1), &ln_x, &ln_y)?;
            c[0] = c[0].exp();
            c
        }
        Model::Logarithmic => {
            let ln_x = ln_axis(model, 'x', x)?;
            fit_coefficients(Model::polynomial(1), &ln_x, y)?
        }
    };

    debug!(model = %model, ?coefficients, "fitted coefficients");
    Ok(coefficients)
}

/// Model predictions (phi) at each x.
pub fn predictions(model: Model, coefficients: &[f64], x: &[f64]) -> Result<Vec<f64>> {
    model.check_coefficients(coefficients)?;
    Ok(x.iter().map(|&xi| model.evaluate(coefficients, xi)).collect())
}

/// Residuals (epsilon) `y_i - f(x_i)`.
pub fn residuals(model: Model, coefficients: &[f64], x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    let phi = predictions(model, coefficients, x)?;
    Ok(y.iter().zip(phi).map(|(&yi, fi)| yi - fi).collect())
}

/// Normal equations `A c = b` with `A[i][k] = Σ x^(i+k)` and `b[i] = Σ x^i y`.
fn fit_polynomial(degree: usize, x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    if degree > Model::MAX_DEGREE {
        return Err(FitError::UnsupportedFamily(format!(
            "{} (degree above {})",
            Model::polynomial(degree),
            Model::MAX_DEGREE
        )));
    }
    let m = degree + 1;

    // Power sums Σ x^k for k in 0..=2·degree.
    let mut moments = vec![0.0; 2 * degree + 1];
    let mut b = DVector::<f64>::zeros(m);
    for (&xi, &yi) in x.iter().zip(y) {
        let mut p = 1.0;
        for (k, moment) in moments.iter_mut().enumerate() {
            *moment += p;
            if k < m {
                b[k] += p * yi;
            }
            p *= xi;
        }
    }

    let a = DMatrix::<f64>::from_fn(m, m, |i, k| moments[i + k]);
    let c = solve_gauss_seidel(&a, &b)?;
    Ok(c.iter().copied().collect())
}

fn ln_axis(model: Model, axis: char, values: &[f64]) -> Result<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(index, &v)| {
            if v > 0.0 {
                Ok(v.ln())
            } else {
                Err(FitError::DomainError {
                    family: model.family().name(),
                    axis,
                    index,
                    value: v,
                })
            }
        })
        .collect()
}

//! Fit-quality statistics: residual RMSE and Pearson correlation.

use serde::{Deserialize, Serialize};

use crate::error::{FitError, Result};

/// Correlations weaker than this are not reported by the significance gate.
pub const STRONG_CORRELATION: f64 = 0.8;

pub const NOTE_DIVISION_BY_ZERO: &str = "Division by zero";
pub const NOTE_WEAK_CORRELATION: &str = "No strong linear dependency detected.";

/// Spread terms at or below this fraction of `N·Σv²` are cancellation noise:
/// the series is treated as constant.
const DEGENERATE_SPREAD: f64 = 1e-12;

/// Whether weak correlations are replaced by `r = 0` plus a caveat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignificanceGate {
    /// `|r| < 0.8` is reported as `r = 0` with a caveat.
    #[default]
    Enforced,
    /// Report the raw coefficient whatever its magnitude.
    Disabled,
}

/// Pearson's r as presented to callers, with an optional caveat.
///
/// `note` is empty when `r` is the true coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub r: f64,
    pub note: String,
}

impl Correlation {
    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }
}

/// Root mean square of the residuals.
pub fn rmse(residuals: &[f64]) -> f64 {
    if residuals.is_empty() {
        return 0.0;
    }
    let sse: f64 = residuals.iter().map(|e| e * e).sum();
    (sse / residuals.len() as f64).sqrt()
}

/// Raw product-moment correlation coefficient.
///
/// `r = (NΣxy − ΣxΣy) / sqrt((NΣx² − (Σx)²)(NΣy² − (Σy)²))`
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    let n = x.len() as f64;

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    let mut sum_y2 = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        sum_x += xi;
        sum_y += yi;
        sum_xy += xi * yi;
        sum_x2 += xi * xi;
        sum_y2 += yi * yi;
    }

    let numerator = n * sum_xy - sum_x * sum_y;
    let spread_x = (n * sum_x2 - sum_x * sum_x).max(0.0);
    let spread_y = (n * sum_y2 - sum_y * sum_y).max(0.0);
    if spread_x <= DEGENERATE_SPREAD * n * sum_x2 || spread_y <= DEGENERATE_SPREAD * n * sum_y2 {
        return Err(FitError::CorrelationUndefined);
    }

    let denominator = (spread_x * spread_y).sqrt();
    if denominator.is_nan() || denominator <= 0.0 {
        return Err(FitError::CorrelationUndefined);
    }
    Ok(numerator / denominator)
}

/// Pearson's r after the zero-denominator and significance rules.
pub fn pearson_correlation(x: &[f64], y: &[f64], gate: SignificanceGate) -> Result<Correlation> {
    let r = match pearson(x, y) {
        Ok(r) => r,
        Err(FitError::CorrelationUndefined) => {
            return Ok(Correlation {
                r: 0.0,
                note: NOTE_DIVISION_BY_ZERO.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    if gate == SignificanceGate::Enforced && r.abs() < STRONG_CORRELATION {
        return Ok(Correlation {
            r: 0.0,
            note: NOTE_WEAK_CORRELATION.to_string(),
        });
    }

    Ok(Correlation {
        r,
        note: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rmse_basic() {
        assert!((rmse(&[3.0, -4.0]) - (12.5_f64).sqrt()).abs() < 1e-12);
        assert_eq!(rmse(&[]), 0.0);
    }

    #[test]
    fn identity_is_perfectly_correlated() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let c = pearson_correlation(&x, &x, SignificanceGate::Enforced).unwrap();
        assert!((c.r - 1.0).abs() < 1e-12);
        assert!(c.note.is_empty());
    }

    #[test]
    fn negative_strong_correlation_passes_the_gate() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [8.0, 6.0, 4.0, 2.0];
        let c = pearson_correlation(&x, &y, SignificanceGate::Enforced).unwrap();
        assert!((c.r + 1.0).abs() < 1e-12);
        assert!(!c.has_note());
    }

    #[test]
    fn constant_y_takes_the_zero_denominator_path() {
        let x = [1.0, 2.0, 3.0];
        let y = [4.0, 4.0, 4.0];
        assert_eq!(pearson(&x, &y), Err(FitError::CorrelationUndefined));

        let c = pearson_correlation(&x, &y, SignificanceGate::Enforced).unwrap();
        assert_eq!(c.r, 0.0);
        assert_eq!(c.note, "Division by zero");
    }

    #[test]
    fn rounding_noise_in_a_constant_series_is_still_undefined() {
        // N·Σy² − (Σy)² rounds to a tiny negative or positive value here.
        let cases: [(&[f64], &[f64]); 4] = [
            (&[1.0, 2.0, 3.0, 4.0, 5.0], &[0.013; 5]),
            (&[1.0, 2.0, 3.0, 4.0, 5.0], &[0.039; 5]),
            (&[1.0, 2.0, 3.0], &[0.7; 3]),
            (&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0], &[0.1; 7]),
        ];
        for (x, y) in cases {
            assert_eq!(pearson(x, y), Err(FitError::CorrelationUndefined), "y = {y:?}");
            assert_eq!(pearson(y, x), Err(FitError::CorrelationUndefined), "x = {y:?}");

            for gate in [SignificanceGate::Enforced, SignificanceGate::Disabled] {
                let c = pearson_correlation(x, y, gate).unwrap();
                assert_eq!(c.r, 0.0);
                assert_eq!(c.note, NOTE_DIVISION_BY_ZERO);
            }
        }
    }

    #[test]
    fn all_zero_series_is_undefined() {
        assert_eq!(
            pearson(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]),
            Err(FitError::CorrelationUndefined)
        );
    }

    #[test]
    fn weak_correlation_is_suppressed_by_the_gate() {
        // r = 0.5 exactly
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 2.0];
        assert!((pearson(&x, &y).unwrap() - 0.5).abs() < 1e-12);

        let c = pearson_correlation(&x, &y, SignificanceGate::Enforced).unwrap();
        assert_eq!(c.r, 0.0);
        assert_eq!(c.note, "No strong linear dependency detected.");
    }

    #[test]
    fn disabled_gate_reports_raw_r() {
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 2.0];
        let c = pearson_correlation(&x, &y, SignificanceGate::Disabled).unwrap();
        assert!((c.r - 0.5).abs() < 1e-12);
        assert!(c.note.is_empty());
    }
}

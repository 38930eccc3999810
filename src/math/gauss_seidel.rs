//! Gauss-Seidel iterative solver for small square systems.
//!
//! We only ever solve normal equations here: at most 4×4 and symmetric
//! positive-(semi)definite, which is the convergence precondition for
//! Gauss-Seidel.
//!
//! Each sweep updates `x[i]` in place using the newest values of the other
//! unknowns. Iteration stops once the largest per-sweep change drops below the
//! tolerance. A bounded sweep count turns singular or divergent systems into
//! `NonConvergence` instead of an endless loop.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::{FitError, Result};

/// Convergence tolerance on the maximum per-sweep change.
pub const TOLERANCE: f64 = 1e-4;

/// Upper bound on sweeps before giving up.
pub const MAX_SWEEPS: usize = 100_000;

/// Solve `a · x = b` starting from `x = 0`.
pub fn solve_gauss_seidel(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>> {
    solve_gauss_seidel_with(a, b, TOLERANCE, MAX_SWEEPS)
}

/// Same as `solve_gauss_seidel` with explicit tolerance and sweep bound.
pub fn solve_gauss_seidel_with(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    tolerance: f64,
    max_sweeps: usize,
) -> Result<DVector<f64>> {
    let n = b.len();
    if a.nrows() != n || a.ncols() != n {
        return Err(FitError::InvalidState(format!(
            "system shape mismatch: matrix is {}x{}, rhs has {n} rows",
            a.nrows(),
            a.ncols()
        )));
    }

    for i in 0..n {
        let pivot = a[(i, i)];
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(FitError::NonConvergence(format!(
                "degenerate pivot {pivot} at row {i}"
            )));
        }
    }

    let mut x = DVector::<f64>::zeros(n);
    for sweep in 1..=max_sweeps {
        let mut delta = 0.0_f64;
        for i in 0..n {
            let mut s = 0.0;
            for j in 0..n {
                if j != i {
                    s += a[(i, j)] * x[j];
                }
            }
            let x_new = (b[i] - s) / a[(i, i)];
            if !x_new.is_finite() {
                return Err(FitError::NonConvergence(format!(
                    "non-finite iterate at row {i} after {sweep} sweeps"
                )));
            }
            delta = delta.max((x_new - x[i]).abs());
            x[i] = x_new;
        }

        if delta < tolerance {
            debug!(n, sweeps = sweep, delta, "gauss-seidel converged");
            return Ok(x);
        }
    }

    Err(FitError::NonConvergence(format!(
        "no convergence within {max_sweeps} sweeps"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_normal_equations_for_a_line() {
        // Normal equations of y = 3 + 2x on x = 1..5.
        let a = DMatrix::from_row_slice(2, 2, &[5.0, 15.0, 15.0, 55.0]);
        let b = DVector::from_row_slice(&[45.0, 155.0]);

        let x = solve_gauss_seidel(&a, &b).unwrap();
        assert!((x[0] - 3.0).abs() < 1e-2, "intercept {}", x[0]);
        assert!((x[1] - 2.0).abs() < 1e-2, "slope {}", x[1]);
    }

    #[test]
    fn agrees_with_direct_solve_on_spd_system() {
        let a = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.5, 1.0, 3.0, 0.2, 0.5, 0.2, 2.0]);
        let b = DVector::from_row_slice(&[1.0, 2.0, 3.0]);

        let iterative = solve_gauss_seidel(&a, &b).unwrap();
        let direct = a.clone().lu().solve(&b).unwrap();
        for i in 0..3 {
            assert!((iterative[i] - direct[i]).abs() < 1e-3);
        }
    }

    #[test]
    fn zero_pivot_is_non_convergence() {
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 2.0]);
        let b = DVector::from_row_slice(&[1.0, 1.0]);
        assert!(matches!(
            solve_gauss_seidel(&a, &b),
            Err(FitError::NonConvergence(_))
        ));
    }

    #[test]
    fn divergent_system_hits_the_sweep_cap() {
        // Not diagonally dominant, not SPD: iterates grow without bound or oscillate.
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 3.0, 3.0, 1.0]);
        let b = DVector::from_row_slice(&[1.0, 1.0]);
        assert!(matches!(
            solve_gauss_seidel_with(&a, &b, TOLERANCE, 50),
            Err(FitError::NonConvergence(_))
        ));
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let b = DVector::from_row_slice(&[1.0, 1.0, 1.0]);
        assert!(matches!(
            solve_gauss_seidel(&a, &b),
            Err(FitError::InvalidState(_))
        ));
    }
}

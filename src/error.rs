//! Error types.
//!
//! - `FitError`: failures of the fitting core (model, solver, statistics)
//! - `AppError`: what the binary reports, carrying a process exit code
//!
//! Exit codes:
//! - `2` usage / input / IO problems
//! - `3` data that cannot be fitted (domain, size, non-finite values)
//! - `4` numerical failures (solver, invalid engine state)

use thiserror::Error;

/// Failures of the fitting core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// An operation was requested that the value cannot support, e.g. the
    /// degree of a non-polynomial model or phi values before a fit.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A model tag outside the four known families.
    #[error("Unsupported model family: `{0}`")]
    UnsupportedFamily(String),

    /// A log-linearized family received a value outside the logarithm's domain.
    #[error("Domain error: {family} fit requires {axis} > 0, found {value} at index {index}")]
    DomainError {
        family: &'static str,
        axis: char,
        index: usize,
        value: f64,
    },

    /// The Gauss-Seidel solver did not settle, or hit a degenerate pivot.
    #[error("Solver did not converge: {0}")]
    NonConvergence(String),

    /// Pearson's denominator is zero (constant x or y series).
    #[error("Correlation undefined: zero variance in x or y")]
    CorrelationUndefined,

    #[error("Sample length mismatch: x has {x} values, y has {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("No samples to fit")]
    EmptySamples,

    #[error("Non-finite sample value at index {0}")]
    NonFiniteSample(usize),
}

/// Result alias for the fitting core.
pub type Result<T> = std::result::Result<T, FitError>;

/// What the binary reports: a message plus the process exit code.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let exit_code = match err {
            FitError::DomainError { .. }
            | FitError::CorrelationUndefined
            | FitError::LengthMismatch { .. }
            | FitError::EmptySamples
            | FitError::NonFiniteSample(_) => 3,
            FitError::UnsupportedFamily(_) => 2,
            FitError::InvalidState(_) | FitError::NonConvergence(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

//! The four model families and their textual / numeric forms.
//!
//! A `Model` is a small immutable value. Fitting code dispatches on it, and it
//! knows how to:
//! - report its family tag and (for polynomials) its degree
//! - render a fitted coefficient vector as a readable expression
//! - evaluate the fitted function at a point (in original units)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FitError, Result};

/// Family tag of a model, without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    Polynomial,
    Exponential,
    Logarithmic,
    Power,
}

impl ModelFamily {
    pub fn name(self) -> &'static str {
        match self {
            ModelFamily::Polynomial => "Polynomial",
            ModelFamily::Exponential => "Exponential",
            ModelFamily::Logarithmic => "Logarithmic",
            ModelFamily::Power => "Power",
        }
    }
}

/// A function shape with free real parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum Model {
    /// `y = c0 + c1 x + ... + cm x^m`
    Polynomial { degree: usize },
    /// `y = a e^(b x)`
    Exponential,
    /// `y = a + b ln(x)`
    Logarithmic,
    /// `y = a x^b`
    Power,
}

impl Model {
    /// Candidates tried by model selection, in tie-breaking order.
    pub const CANDIDATES: [Model; 6] = [
        Model::Polynomial { degree: 1 },
        Model::Polynomial { degree: 2 },
        Model::Polynomial { degree: 3 },
        Model::Exponential,
        Model::Logarithmic,
        Model::Power,
    ];

    /// Highest polynomial degree that is parsed or fitted.
    pub const MAX_DEGREE: usize = 10;

    pub fn polynomial(degree: usize) -> Self {
        Model::Polynomial { degree }
    }

    pub fn family(self) -> ModelFamily {
        match self {
            Model::Polynomial { .. } => ModelFamily::Polynomial,
            Model::Exponential => ModelFamily::Exponential,
            Model::Logarithmic => ModelFamily::Logarithmic,
            Model::Power => ModelFamily::Power,
        }
    }

    /// Polynomial degree. Asking a non-polynomial model for one is an error.
    pub fn degree(self) -> Result<usize> {
        match self {
            Model::Polynomial { degree } => Ok(degree),
            other => Err(FitError::InvalidState(format!(
                "cannot get degree of a non-polynomial model ({})",
                other.describe()
            ))),
        }
    }

    /// Number of coefficients a fit of this model produces.
    pub fn coefficient_len(self) -> usize {
        match self {
            Model::Polynomial { degree } => degree + 1,
            Model::Exponential | Model::Logarithmic | Model::Power => 2,
        }
    }

    /// Short tag for diagnostics, e.g. `Polynomial(2)`.
    pub fn describe(self) -> String {
        match self {
            Model::Polynomial { degree } => format!("Polynomial({degree})"),
            other => other.family().name().to_string(),
        }
    }

    /// Fail with `InvalidState` unless `coefficients` fits this model.
    pub fn check_coefficients(self, coefficients: &[f64]) -> Result<()> {
        let expected = self.coefficient_len();
        if coefficients.len() != expected {
            return Err(FitError::InvalidState(format!(
                "{} expects {expected} coefficients, got {}",
                self.describe(),
                coefficients.len()
            )));
        }
        Ok(())
    }

    /// Render the fitted function with 4-decimal coefficients.
    pub fn render(self, coefficients: &[f64]) -> Result<String> {
        self.check_coefficients(coefficients)?;
        let rendered = match self {
            Model::Polynomial { .. } => render_polynomial(coefficients),
            Model::Exponential => format!("{:.4}*exp({:.4}x)", coefficients[0], coefficients[1]),
            Model::Logarithmic => format!("{:.4} + {:.4}*ln(x)", coefficients[0], coefficients[1]),
            Model::Power => format!("{:.4}x^{:.4}", coefficients[0], coefficients[1]),
        };
        Ok(rendered)
    }

    /// Evaluate the fitted function at `x`.
    ///
    /// # Panics
    /// Panics if `coefficients` is shorter than `self.coefficient_len()`.
    /// Use `check_coefficients` first for untrusted input.
    pub fn evaluate(self, coefficients: &[f64], x: f64) -> f64 {
        match self {
            Model::Polynomial { degree } => coefficients[..=degree]
                .iter()
                .rev()
                .fold(0.0, |acc, &c| acc * x + c),
            Model::Exponential => coefficients[0] * (coefficients[1] * x).exp(),
            Model::Logarithmic => coefficients[0] + coefficients[1] * x.ln(),
            Model::Power => coefficients[0] * x.powf(coefficients[1]),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl FromStr for Model {
    type Err = FitError;

    /// Accepts `describe()` output plus short CLI forms:
    /// `poly2`, `exp`, `log`, `pow` (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_ascii_lowercase();
        match tag.as_str() {
            "exp" | "exponential" => return Ok(Model::Exponential),
            "log" | "ln" | "logarithmic" => return Ok(Model::Logarithmic),
            "pow" | "power" => return Ok(Model::Power),
            _ => {}
        }

        let degree = tag
            .strip_prefix("polynomial(")
            .and_then(|rest| rest.strip_suffix(')'))
            .or_else(|| tag.strip_prefix("poly"))
            .and_then(|d| d.trim().parse::<usize>().ok())
            .filter(|&d| d <= Model::MAX_DEGREE);

        degree
            .map(Model::polynomial)
            .ok_or_else(|| FitError::UnsupportedFamily(s.trim().to_string()))
    }
}

/// Highest power first; zero terms dropped; all-zero renders as `0`.
fn render_polynomial(coefficients: &[f64]) -> String {
    let mut out = String::new();
    for (power, &coef) in coefficients.iter().enumerate().rev() {
        if coef == 0.0 {
            continue;
        }
        if out.is_empty() {
            out.push_str(&format!("{coef:.4}"));
        } else {
            out.push(if coef >= 0.0 { '+' } else { '-' });
            out.push_str(&format!("{:.4}", coef.abs()));
        }
        match power {
            0 => {}
            1 => out.push('x'),
            p => out.push_str(&format!("x^{p}")),
        }
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

//! Fitting engine bound to one dataset and one model.
//!
//! The engine keeps the last computed coefficient vector so that phi and
//! epsilon can be derived from it. Build one engine per request; it is not
//! meant to be shared between callers.

use tracing::debug;

use crate::domain::{FitReport, Samples};
use crate::error::{FitError, Result};
use crate::fit::fitter::{fit_coefficients, predictions, residuals};
use crate::math::{Correlation, SignificanceGate, pearson_correlation, rmse};
use crate::models::Model;

#[derive(Debug, Clone)]
pub struct ApproximationEngine {
    model: Model,
    samples: Samples,
    gate: SignificanceGate,
    coefficients: Option<Vec<f64>>,
}

impl ApproximationEngine {
    pub fn new(model: Model, samples: Samples) -> Self {
        Self {
            model,
            samples,
            gate: SignificanceGate::default(),
            coefficients: None,
        }
    }

    pub fn with_gate(mut self, gate: SignificanceGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    /// Last computed coefficients, if any.
    pub fn coefficients(&self) -> Option<&[f64]> {
        self.coefficients.as_deref()
    }

    /// Fit the model and remember the coefficients.
    ///
    /// A failed fit leaves no stored coefficients.
    pub fn calculate_coefficients(&mut self) -> Result<&[f64]> {
        self.coefficients = None;
        let c = fit_coefficients(self.model, self.samples.x(), self.samples.y())?;
        Ok(self.coefficients.insert(c).as_slice())
    }

    /// Predicted y at every sample x.
    pub fn phi(&self) -> Result<Vec<f64>> {
        predictions(self.model, self.require_coefficients()?, self.samples.x())
    }

    /// Residuals `y - phi` at every sample.
    pub fn epsilon(&self) -> Result<Vec<f64>> {
        residuals(
            self.model,
            self.require_coefficients()?,
            self.samples.x(),
            self.samples.y(),
        )
    }

    /// Pearson's r of the raw series, after the significance gate.
    pub fn correlation(&self) -> Result<Correlation> {
        pearson_correlation(self.samples.x(), self.samples.y(), self.gate)
    }

    /// Full bundle: coefficients, phi, epsilon, RMSE and correlation.
    pub fn calculate(&mut self) -> Result<FitReport> {
        let coefficients = self.calculate_coefficients()?.to_vec();
        let phi = self.phi()?;
        let epsilon: Vec<f64> = self
            .samples
            .y()
            .iter()
            .zip(&phi)
            .map(|(y, f)| y - f)
            .collect();
        let correlation = self.correlation()?;
        let rmse = rmse(&epsilon);

        debug!(model = %self.model, rmse, r = correlation.r, "fit complete");
        Ok(FitReport {
            model: self.model,
            coefficients,
            phi,
            epsilon,
            rmse,
            correlation,
        })
    }

    fn require_coefficients(&self) -> Result<&[f64]> {
        self.coefficients.as_deref().ok_or_else(|| {
            FitError::InvalidState("coefficients have not been calculated".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_samples() -> Samples {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = x.iter().map(|v| 2.0 * v + 3.0).collect();
        Samples::new(x, y).unwrap()
    }

    #[test]
    fn phi_before_fit_is_invalid_state() {
        let engine = ApproximationEngine::new(Model::polynomial(1), line_samples());
        assert!(matches!(engine.phi(), Err(FitError::InvalidState(_))));
        assert!(matches!(engine.epsilon(), Err(FitError::InvalidState(_))));
    }

    #[test]
    fn calculate_produces_consistent_bundle() {
        let mut engine = ApproximationEngine::new(Model::polynomial(1), line_samples());
        let report = engine.calculate().unwrap();

        assert_eq!(report.coefficients.len(), 2);
        assert!((report.coefficients[0] - 3.0).abs() < 1e-2);
        assert!((report.coefficients[1] - 2.0).abs() < 1e-2);
        assert!(report.rmse < 1e-2);
        assert!((report.correlation.r - 1.0).abs() < 1e-12);
        assert!(report.correlation.note.is_empty());

        let y = engine.samples().y();
        for i in 0..y.len() {
            assert_eq!(report.epsilon[i], y[i] - report.phi[i]);
        }
        assert_eq!(engine.epsilon().unwrap(), report.epsilon);
    }

    #[test]
    fn failed_fit_stores_nothing() {
        let samples = Samples::new(vec![1.0, 2.0, 3.0], vec![1.0, -2.0, 3.0]).unwrap();
        let mut engine = ApproximationEngine::new(Model::Exponential, samples);
        assert!(matches!(
            engine.calculate(),
            Err(FitError::DomainError { .. })
        ));
        assert!(engine.coefficients().is_none());
        assert!(matches!(engine.phi(), Err(FitError::InvalidState(_))));
    }

    #[test]
    fn gate_is_applied_to_correlation() {
        let samples = Samples::new(vec![1.0, 2.0, 3.0], vec![1.0, 3.0, 2.0]).unwrap();
        let engine = ApproximationEngine::new(Model::polynomial(1), samples);
        assert_eq!(engine.correlation().unwrap().r, 0.0);

        let engine = engine.with_gate(SignificanceGate::Disabled);
        assert!((engine.correlation().unwrap().r - 0.5).abs() < 1e-12);
    }
}

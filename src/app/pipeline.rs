//! Shared "fit pipeline" logic used by the `fit` and `select` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> model selection (or fixed model) -> engine fit -> report
//!
//! The command handlers can then focus on presentation (printing, plots, exports).

use tracing::info;

use crate::domain::{FitConfig, FitReport, ModelChoice};
use crate::error::AppError;
use crate::fit::{ApproximationEngine, ModelSelection, select_model};
use crate::io::ingest::{IngestedData, load_samples};

/// All computed outputs of a single `lsq fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    /// Present only when the model was chosen automatically.
    pub selection: Option<ModelSelection>,
    pub report: FitReport,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let ingest = load_samples(&config.input_path)?;
    run_fit_with_data(config, ingest)
}

/// Execute the fitting pipeline on already-loaded samples.
pub fn run_fit_with_data(config: &FitConfig, ingest: IngestedData) -> Result<RunOutput, AppError> {
    let (model, selection) = match config.model {
        ModelChoice::Fixed(model) => (model, None),
        ModelChoice::Auto => {
            let selection = select_model(ingest.samples.x(), ingest.samples.y())?;
            (selection.best.model, Some(selection))
        }
    };
    info!(%model, auto = selection.is_some(), "fitting");

    let report = ApproximationEngine::new(model, ingest.samples.clone())
        .with_gate(config.gate)
        .calculate()?;

    Ok(RunOutput {
        ingest,
        selection,
        report,
    })
}

/// Load samples and score every candidate family.
pub fn run_select(input: &std::path::Path) -> Result<(IngestedData, ModelSelection), AppError> {
    let ingest = load_samples(input)?;
    let selection = select_model(ingest.samples.x(), ingest.samples.y())?;
    Ok((ingest, selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Samples;
    use crate::math::{NOTE_WEAK_CORRELATION, SignificanceGate};
    use crate::models::Model;
    use std::path::PathBuf;

    fn config(model: ModelChoice, gate: SignificanceGate) -> FitConfig {
        FitConfig {
            input_path: PathBuf::from("unused.txt"),
            model,
            gate,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_results: None,
            export_fit: None,
        }
    }

    fn data(x: Vec<f64>, y: Vec<f64>) -> IngestedData {
        IngestedData::from_samples(Samples::new(x, y).unwrap())
    }

    #[test]
    fn auto_selection_picks_linear_for_a_line() {
        let ingest = data(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![5.0, 7.0, 9.0, 11.0, 13.0]);
        let run = run_fit_with_data(&config(ModelChoice::Auto, SignificanceGate::Enforced), ingest).unwrap();

        assert_eq!(run.report.model, Model::polynomial(1));
        assert!(run.selection.is_some());
        assert!((run.report.coefficients[0] - 3.0).abs() < 1e-2);
        assert!((run.report.coefficients[1] - 2.0).abs() < 1e-2);
        assert!((run.report.correlation.r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn fixed_model_skips_selection() {
        let ingest = data(vec![1.0, 2.0, 3.0, 4.0], vec![2.0, 4.0, 6.0, 8.0]);
        let choice = ModelChoice::Fixed(Model::polynomial(2));
        let run = run_fit_with_data(&config(choice, SignificanceGate::Enforced), ingest).unwrap();

        assert_eq!(run.report.model, Model::polynomial(2));
        assert!(run.selection.is_none());
        assert_eq!(run.report.coefficients.len(), 3);
    }

    #[test]
    fn weak_correlation_note_depends_on_gate() {
        let x = vec![-2.0, -1.0, 0.0, 1.0, 2.0];
        let y = vec![4.0, 1.0, 0.0, 1.0, 4.0];
        let choice = ModelChoice::Fixed(Model::polynomial(2));

        let gated = run_fit_with_data(&config(choice, SignificanceGate::Enforced), data(x.clone(), y.clone())).unwrap();
        assert_eq!(gated.report.correlation.note, NOTE_WEAK_CORRELATION);

        let raw = run_fit_with_data(&config(choice, SignificanceGate::Disabled), data(x, y)).unwrap();
        assert!(!raw.report.correlation.has_note());
        assert!(raw.report.correlation.r.abs() < 1e-9);
    }

    #[test]
    fn domain_error_maps_to_data_exit_code() {
        let ingest = data(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]);
        let choice = ModelChoice::Fixed(Model::Logarithmic);
        let err = run_fit_with_data(&config(choice, SignificanceGate::Enforced), ingest).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_input_is_a_usage_error() {
        let mut cfg = config(ModelChoice::Auto, SignificanceGate::Enforced);
        cfg.input_path = PathBuf::from("/definitely/not/here/points.txt");
        assert_eq!(run_fit(&cfg).unwrap_err().exit_code(), 2);
    }
}

//! Command-line parsing for the curve fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::ModelChoice;
use crate::models::Model;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "lsq", version, about = "Least-squares curve fitting with model selection")]
pub struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit samples, print the result, and optionally plot/export.
    Fit(FitArgs),
    /// Score every candidate family and print the diagnostics table.
    Select(SelectArgs),
    /// Plot a previously exported fit JSON.
    Plot(PlotArgs),
    /// Generate a synthetic sample file from a known model.
    Sample(SampleArgs),
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Sample file: two lines (x values, y values) or a CSV with `x`,`y` columns.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Model to fit: `auto`, `poly<N>` (N <= 10), `exp`, `log` or `pow`.
    #[arg(short, long, default_value = "auto", value_parser = parse_model_choice)]
    pub model: ModelChoice,

    /// Report the raw Pearson r even when |r| < 0.8.
    #[arg(long)]
    pub no_gate: bool,

    /// Render an ASCII plot of the samples and the fitted curve.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export per-sample results (x, y, phi, epsilon) to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fit (model + coefficients + evaluation grid) to JSON.
    #[arg(long = "export-fit")]
    pub export_fit: Option<PathBuf>,
}

/// Options for model selection diagnostics.
#[derive(Debug, Parser)]
pub struct SelectArgs {
    /// Sample file (same formats as `fit`).
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,
}

/// Options for plotting a saved fit.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Fit JSON file produced by `lsq fit --export-fit`.
    #[arg(long, value_name = "JSON")]
    pub fit: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Generating model: `poly<N>`, `exp`, `log` or `pow`.
    #[arg(short, long, value_parser = parse_model)]
    pub model: Model,

    /// Comma-separated coefficients (constant term first for polynomials).
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub coeffs: Vec<f64>,

    /// Number of points.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,

    /// Smallest x.
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Largest x.
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    pub x_max: f64,

    /// Standard deviation of Gaussian noise added to y.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output file (two-line text format).
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

fn parse_model(s: &str) -> Result<Model, String> {
    s.parse::<Model>().map_err(|e| e.to_string())
}

fn parse_model_choice(s: &str) -> Result<ModelChoice, String> {
    if s.trim().eq_ignore_ascii_case("auto") {
        return Ok(ModelChoice::Auto);
    }
    parse_model(s).map(ModelChoice::Fixed)
}

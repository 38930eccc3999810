//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - loads or generates samples
//! - runs model selection + curve fitting
//! - prints reports/plots
//! - writes optional exports

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, FitArgs, PlotArgs, SampleArgs, SelectArgs};
use crate::domain::{FitConfig, SampleConfig};
use crate::error::AppError;
use crate::math::SignificanceGate;

pub mod pipeline;

/// Entry point for the `lsq` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Select(args) => handle_select(args),
        Command::Plot(args) => handle_plot(args),
        Command::Sample(args) => handle_sample(args),
    }
}

/// Logs go to stderr so stdout stays clean for reports. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests, embedding) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    print!("{}", format_fit_output(&run, &timestamp)?);

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.ingest.samples,
            &run.report,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.ingest.samples, &run.report)?;
    }
    if let Some(path) = &config.export_fit {
        crate::io::fit_file::write_fit_json(path, &run.report, &run.ingest.stats)?;
    }

    Ok(())
}

/// Run summary, followed by the candidate table when the model was auto-selected.
fn format_fit_output(run: &pipeline::RunOutput, timestamp: &str) -> Result<String, AppError> {
    let mut out =
        crate::report::format_run_summary(timestamp, &run.ingest.stats, &run.ingest.samples, &run.report)?;
    if let Some(selection) = &run.selection {
        out.push('\n');
        out.push_str(&crate::report::format_candidates(selection));
    }
    Ok(out)
}

fn handle_select(args: SelectArgs) -> Result<(), AppError> {
    let (_, selection) = pipeline::run_select(&args.input)?;
    println!("{}", crate::report::format_candidates(&selection));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let fit = crate::io::fit_file::read_fit_json(&args.fit)?;

    println!("Fit: {} {}", fit.model, fit.function);
    let plot = crate::plot::render_ascii_plot_from_fit_file(&fit, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args);
    let samples = crate::data::generate_samples(&config)?;
    crate::io::export::write_samples_text(&args.output, &samples)?;
    println!("Wrote {} samples to {}", samples.len(), args.output.display());
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        input_path: args.input.clone(),
        model: args.model,
        gate: if args.no_gate {
            SignificanceGate::Disabled
        } else {
            SignificanceGate::Enforced
        },
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_fit: args.export_fit.clone(),
    }
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        model: args.model,
        coefficients: args.coeffs.clone(),
        count: args.count,
        x_min: args.x_min,
        x_max: args.x_max,
        noise: args.noise,
        seed: args.seed,
    }
}

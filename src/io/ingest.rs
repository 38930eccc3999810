//! Sample ingest.
//!
//! Two input formats are accepted:
//!
//! - **Text** (default): two lines of whitespace-separated numbers, x values
//!   first, y values second. The whole file is rejected on any bad token.
//! - **CSV** (`.csv` extension): a header row with `x` and `y` columns. Bad rows
//!   are skipped and reported, the rest is used.
//!
//! Both produce a validated `Samples` plus stats. No fitting logic here.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use tracing::{info, warn};

use crate::domain::{DatasetStats, Samples};
use crate::error::AppError;

/// A row-level error encountered during CSV ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: validated samples + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub samples: Samples,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

impl IngestedData {
    pub fn from_samples(samples: Samples) -> Self {
        let n = samples.len();
        Self {
            stats: samples.stats(),
            samples,
            row_errors: Vec::new(),
            rows_read: n,
            rows_used: n,
        }
    }
}

/// Load samples from `path`, choosing the format by extension.
pub fn load_samples(path: &Path) -> Result<IngestedData, AppError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let data = if is_csv {
        load_csv(path)?
    } else {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", path.display())))?;
        let (x, y) = parse_two_line(&text)?;
        IngestedData::from_samples(to_samples(x, y)?)
    };

    info!(
        path = %path.display(),
        n = data.rows_used,
        skipped = data.row_errors.len(),
        "loaded samples"
    );
    Ok(data)
}

/// Parse the two-line text format into raw `(x, y)` vectors.
pub fn parse_two_line(text: &str) -> Result<(Vec<f64>, Vec<f64>), AppError> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let (Some(x_line), Some(y_line)) = (lines.next(), lines.next()) else {
        return Err(AppError::new(
            2,
            "Invalid file format: expected a line of x values and a line of y values.",
        ));
    };

    let x = parse_line(x_line, 'x')?;
    let y = parse_line(y_line, 'y')?;
    if x.len() != y.len() {
        return Err(AppError::new(
            2,
            format!(
                "Invalid file format: {} x values but {} y values.",
                x.len(),
                y.len()
            ),
        ));
    }
    Ok((x, y))
}

fn parse_line(line: &str, axis: char) -> Result<Vec<f64>, AppError> {
    line.split_whitespace()
        .map(|token| {
            parse_f64(token).ok_or_else(|| {
                AppError::new(2, format!("Not all elements of {axis} are numbers: '{token}'"))
            })
        })
        .collect()
}

fn load_csv(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);
    let (Some(&x_idx), Some(&y_idx)) = (header_map.get("x"), header_map.get("y")) else {
        return Err(AppError::new(2, "CSV must have `x` and `y` columns."));
    };

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1, records are 1-based after it.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match (field(&record, x_idx), field(&record, y_idx)) {
            (Some(xi), Some(yi)) => {
                x.push(xi);
                y.push(yi);
            }
            _ => row_errors.push(RowError {
                line,
                message: "Missing/invalid `x` or `y` value.".to_string(),
            }),
        }
    }

    for e in &row_errors {
        warn!(line = e.line, message = %e.message, "skipped CSV row");
    }

    let rows_used = x.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid rows in CSV."));
    }

    let samples = to_samples(x, y)?;
    Ok(IngestedData {
        stats: samples.stats(),
        samples,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn to_samples(x: Vec<f64>, y: Vec<f64>) -> Result<Samples, AppError> {
    Samples::new(x, y).map_err(AppError::from)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports may prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn field(record: &StringRecord, idx: usize) -> Option<f64> {
    record.get(idx).map(str::trim).and_then(parse_f64)
}

fn parse_f64(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

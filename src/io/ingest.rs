//! Series ingest and validation.
//!
//! Turns a CSV or JSON file of `(date, value)` observations into an ordered
//! `Vec<Sample>` the analysis pipeline can consume.
//!
//! - **Strict schema** for the date/value columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Ordering is checked, never repaired**: out-of-order dates are an error

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::StringRecord;
use serde::Deserialize;

use crate::domain::{InputFormat, Sample};
use crate::error::AppError;

const DATE_COLUMNS: [&str; 4] = ["date", "observation_date", "period", "fulldate"];
const VALUE_COLUMNS: [&str; 4] = ["value", "indicatorvalue", "obs_value", "observation"];

/// Where to read a series from and which slice of it to keep.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub path: PathBuf,
    pub format: InputFormat,
    /// Inclusive lower bound on sample dates.
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound on sample dates.
    pub end: Option<NaiveDate>,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: ordered samples + what was skipped along the way.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub samples: Vec<Sample>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    /// Samples dropped by the date-range filter.
    pub rows_filtered: usize,
    pub source_label: String,
}

/// Load, validate and filter a series file.
pub fn load_series(config: &SourceConfig) -> Result<LoadedSeries, AppError> {
    if let (Some(start), Some(end)) = (config.start, config.end) {
        if start > end {
            return Err(AppError::input(format!(
                "Invalid date range: start {start} is after end {end}."
            )));
        }
    }

    let format = resolve_format(config.format, &config.path);
    tracing::info!(path = %config.path.display(), ?format, "loading series");

    let parsed = match format {
        InputFormat::Json => read_json(&config.path)?,
        InputFormat::Csv | InputFormat::Auto => read_csv(&config.path)?,
    };

    let loaded = finalize(parsed, config.start, config.end, source_label(&config.path))?;
    for err in &loaded.row_errors {
        tracing::warn!(line = err.line, "{}", err.message);
    }
    tracing::info!(
        rows_read = loaded.rows_read,
        used = loaded.samples.len(),
        skipped = loaded.row_errors.len(),
        filtered = loaded.rows_filtered,
        "series loaded"
    );
    Ok(loaded)
}

/// Apply the date-range filter and check ordering on already-fetched samples.
pub fn filter_range(
    samples: Vec<Sample>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<Sample>, AppError> {
    let rows = samples.into_iter().enumerate().map(|(i, s)| (i + 1, s)).collect();
    let parsed = ParsedRows {
        rows,
        row_errors: Vec::new(),
        rows_read: 0,
    };
    Ok(finalize(parsed, start, end, String::new())?.samples)
}

fn resolve_format(format: InputFormat, path: &Path) -> InputFormat {
    match format {
        InputFormat::Auto => {
            let is_json = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"));
            if is_json { InputFormat::Json } else { InputFormat::Csv }
        }
        other => other,
    }
}

fn source_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Successfully parsed rows tagged with their source line.
struct ParsedRows {
    rows: Vec<(usize, Sample)>,
    row_errors: Vec<RowError>,
    rows_read: usize,
}

fn finalize(
    parsed: ParsedRows,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    source_label: String,
) -> Result<LoadedSeries, AppError> {
    let before = parsed.rows.len();
    let kept: Vec<(usize, Sample)> = parsed
        .rows
        .into_iter()
        .filter(|(_, s)| start.is_none_or(|d| s.date >= d) && end.is_none_or(|d| s.date <= d))
        .collect();
    let rows_filtered = before - kept.len();

    for pair in kept.windows(2) {
        let (_, prev) = pair[0];
        let (line, next) = pair[1];
        if next.date < prev.date {
            return Err(AppError::input(format!(
                "Observations must be in ascending date order: line {line} ({}) comes after {}.",
                next.date, prev.date
            )));
        }
    }

    Ok(LoadedSeries {
        samples: kept.into_iter().map(|(_, s)| s).collect(),
        row_errors: parsed.row_errors,
        rows_read: parsed.rows_read,
        rows_filtered,
        source_label,
    })
}

fn read_csv(path: &Path) -> Result<ParsedRows, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    parse_csv(file)
}

fn parse_csv<R: std::io::Read>(reader: R) -> Result<ParsedRows, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let date_idx = find_column(&header_map, &DATE_COLUMNS)
        .ok_or_else(|| AppError::input("Missing required column: `date`"))?;
    let value_idx = find_column(&header_map, &VALUE_COLUMNS)
        .ok_or_else(|| AppError::input("Missing required column: `value`"))?;

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header; CSV lines are 1-based.
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

        match parse_record(&record, date_idx, value_idx) {
            Ok(sample) => rows.push((line, sample)),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    Ok(ParsedRows {
        rows,
        row_errors,
        rows_read,
    })
}

fn parse_record(
    record: &StringRecord,
    date_idx: usize,
    value_idx: usize,
) -> Result<Sample, String> {
    let raw_date = record
        .get(date_idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing required value: `date`".to_string())?;
    let raw_value = record
        .get(value_idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing required value: `value`".to_string())?;

    let date = parse_date(raw_date)?;
    let value = parse_value(raw_value).ok_or_else(|| format!("Invalid value '{raw_value}'."))?;
    Ok(Sample::new(date, value))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn find_column(header_map: &HashMap<String, usize>, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|name| header_map.get(*name).copied())
}

/// Chart-data shape: either a bare array or wrapped under `chartData`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonSeries {
    Points(Vec<JsonPoint>),
    Wrapped {
        #[serde(rename = "chartData")]
        chart_data: Vec<JsonPoint>,
    },
}

#[derive(Debug, Deserialize)]
struct JsonPoint {
    date: String,
    value: Option<JsonValue>,
}

/// Warehouse DECIMAL columns arrive as strings (`"12.50"`), API values as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonValue {
    Number(f64),
    Text(String),
}

impl JsonValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(v) => v.is_finite().then_some(*v),
            JsonValue::Text(s) => parse_value(s),
        }
    }
}

fn read_json(path: &Path) -> Result<ParsedRows, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open JSON '{}': {e}", path.display())))?;
    parse_json(file)
}

fn parse_json<R: std::io::Read>(reader: R) -> Result<ParsedRows, AppError> {
    let series: JsonSeries = serde_json::from_reader(reader)
        .map_err(|e| AppError::input(format!("Invalid series JSON: {e}")))?;
    let points = match series {
        JsonSeries::Points(points) | JsonSeries::Wrapped { chart_data: points } => points,
    };

    let rows_read = points.len();
    let mut rows = Vec::with_capacity(points.len());
    let mut row_errors = Vec::new();
    for (idx, point) in points.into_iter().enumerate() {
        let line = idx + 1;
        let parsed = parse_date(&point.date).and_then(|date| {
            point
                .value
                .as_ref()
                .and_then(JsonValue::as_f64)
                .map(|v| Sample::new(date, v))
                .ok_or_else(|| "Missing/invalid `value`.".to_string())
        });
        match parsed {
            Ok(sample) => rows.push((line, sample)),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    Ok(ParsedRows {
        rows,
        row_errors,
        rows_read,
    })
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // Warehouse and API exports often carry a time suffix on ISO dates.
    let iso = s.get(..10).unwrap_or(s);
    if let Ok(d) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        return Ok(d);
    }
    const FMTS: [&str; 3] = ["%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, DD/MM/YYYY, YYYY/MM/DD, DD-MM-YYYY."
    ))
}

fn parse_value(s: &str) -> Option<f64> {
    let s = s.trim();
    if s == "." {
        return None;
    }
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

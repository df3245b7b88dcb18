//! Export an analysis to JSON.
//!
//! The schema is defined by `domain::AnalysisFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{AnalysisFile, SeriesAnalysis};
use crate::error::AppError;

pub const TOOL_NAME: &str = "insight";

pub fn analysis_file(
    indicator: &str,
    unit: Option<&str>,
    analysis: &SeriesAnalysis,
) -> AnalysisFile {
    AnalysisFile {
        tool: TOOL_NAME.to_string(),
        indicator: indicator.to_string(),
        unit: unit.map(str::to_string),
        sample_count: analysis.basic_stats.count,
        analysis: analysis.clone(),
    }
}

/// Write an analysis JSON file.
pub fn write_analysis_json(path: &Path, file: &AnalysisFile) -> Result<(), AppError> {
    let out = File::create(path).map_err(|e| {
        AppError::input(format!(
            "Failed to create analysis JSON '{}': {e}",
            path.display()
        ))
    })?;
    serde_json::to_writer_pretty(out, file)
        .map_err(|e| AppError::input(format!("Failed to write analysis JSON: {e}")))?;
    tracing::info!(path = %path.display(), "analysis exported");
    Ok(())
}

/// Pretty JSON for stdout.
pub fn analysis_json_string(file: &AnalysisFile) -> Result<String, AppError> {
    serde_json::to_string_pretty(file)
        .map_err(|e| AppError::input(format!("Failed to serialize analysis: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::domain::Sample;
    use chrono::NaiveDate;

    fn read_analysis_json(path: &Path) -> AnalysisFile {
        let file = File::open(path).unwrap();
        serde_json::from_reader(file).unwrap()
    }

    #[test]
    fn written_file_reads_back() {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let series: Vec<Sample> = (0..8)
            .map(|i| Sample::new(start + chrono::Months::new(i), 10.0 + i as f64))
            .collect();
        let analysis = analyze(&series).unwrap();
        let file = analysis_file("Policy rate", Some("%"), &analysis);

        let path = std::env::temp_dir().join(format!("insight-export-{}.json", std::process::id()));
        write_analysis_json(&path, &file).unwrap();
        let back = read_analysis_json(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(back.tool, TOOL_NAME);
        assert_eq!(back.sample_count, 8);
        assert_eq!(back.analysis, analysis);
    }

    #[test]
    fn irrational_looking_floats_survive_json() {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let series: Vec<Sample> = (0..30)
            .map(|i| {
                let v = 100.0 / 3.0 + (i as f64 * 0.7).sin() * 1.1 + i as f64 / 7.0;
                Sample::new(start + chrono::Months::new(i), v)
            })
            .collect();
        let analysis = analyze(&series).unwrap();
        let json = analysis_json_string(&analysis_file("Ratio", None, &analysis)).unwrap();
        let back: AnalysisFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.analysis, analysis);
    }

    #[test]
    fn enums_serialize_lowercase() {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let series = vec![
            Sample::new(start, 1.0),
            Sample::new(start + chrono::Months::new(1), 2.0),
        ];
        let analysis = analyze(&series).unwrap();
        let json = analysis_json_string(&analysis_file("x", None, &analysis)).unwrap();
        assert!(json.contains("\"direction\": \"increasing\""));
        assert!(json.contains("\"level\": \"high\""));
        assert!(!json.contains("\"unit\""));
    }
}

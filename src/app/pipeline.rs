//! Shared "load -> analyze" logic used by every front-end command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! source (file or FRED) -> date filter -> validation -> analysis
//!
//! The commands can then focus on presentation (text vs JSON, exports).

use crate::analysis::analyze;
use crate::data::FredClient;
use crate::domain::{Sample, SeriesAnalysis};
use crate::error::AppError;
use crate::io::ingest::{filter_range, load_series, RowError};
use crate::report::format_insufficient;

use super::{AnalyzeConfig, SeriesSource};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub indicator: String,
    pub unit: Option<String>,
    pub analysis: SeriesAnalysis,
    pub row_errors: Vec<RowError>,
}

/// Load the configured series and analyze it.
pub fn run_analysis(config: &AnalyzeConfig) -> Result<RunOutput, AppError> {
    match &config.source {
        SeriesSource::File(source) => {
            let loaded = load_series(source)?;
            let indicator = config.indicator.clone().unwrap_or(loaded.source_label);
            let mut run =
                run_analysis_with_samples(indicator, config.unit.clone(), &loaded.samples)?;
            run.row_errors = loaded.row_errors;
            Ok(run)
        }
        SeriesSource::Fred { series_id, start, end } => {
            let client = FredClient::from_env()?;
            let info = client.fetch_series_info(series_id)?;
            let fetched = client.fetch_series(series_id, *start, *end)?;
            let samples = filter_range(fetched, *start, *end)?;
            let indicator = config
                .indicator
                .clone()
                .unwrap_or_else(|| format!("{} ({})", info.title, info.id));
            let unit = config
                .unit
                .clone()
                .or_else(|| (!info.units.is_empty()).then_some(info.units));
            run_analysis_with_samples(indicator, unit, &samples)
        }
    }
}

/// Analyze already-loaded samples.
///
/// Fewer than two samples is reported as an insufficient-data error (exit code 3).
pub fn run_analysis_with_samples(
    indicator: String,
    unit: Option<String>,
    samples: &[Sample],
) -> Result<RunOutput, AppError> {
    let analysis = analyze(samples).ok_or_else(|| {
        AppError::insufficient_data(format_insufficient(&indicator, samples.len()))
    })?;

    Ok(RunOutput {
        indicator,
        unit,
        analysis,
        row_errors: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InputFormat;
    use crate::io::ingest::SourceConfig;
    use chrono::NaiveDate;

    #[test]
    fn single_sample_is_insufficient() {
        let one = [Sample::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 1.0)];
        let err = run_analysis_with_samples("GDP".to_string(), None, &one).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.message().contains("insufficient data"));
    }

    #[test]
    fn file_source_end_to_end() {
        let path = std::env::temp_dir()
            .join(format!("insight-pipeline-{}.csv", std::process::id()));
        let mut csv = String::from("date,value\n");
        for m in 1..=12 {
            csv.push_str(&format!("2023-{m:02}-01,{}\n", 100 + m));
        }
        csv.push_str("2024-01-01,oops\n");
        std::fs::write(&path, csv).unwrap();

        let config = AnalyzeConfig {
            source: SeriesSource::File(SourceConfig {
                path: path.clone(),
                format: InputFormat::Auto,
                start: NaiveDate::from_ymd_opt(2023, 3, 1),
                end: None,
            }),
            indicator: None,
            unit: Some("index".to_string()),
            json: false,
            export: None,
        };
        let run = run_analysis(&config);
        std::fs::remove_file(&path).ok();
        let run = run.unwrap();

        assert_eq!(run.analysis.basic_stats.count, 10);
        assert_eq!(run.analysis.basic_stats.start_value, 103.0);
        assert_eq!(run.row_errors.len(), 1);
        assert!(run.indicator.starts_with("insight-pipeline-"));
    }
}

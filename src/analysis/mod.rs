//! Statistical feature extraction for one economic time series.
//!
//! Flow:
//!
//! ```text
//! series -> basic stats -> { trend, seasonality, volatility, outliers } -> insights
//! ```
//!
//! Every stage is a pure function of the series and, where needed, the basic
//! stats. The four middle stages do not depend on each other and run in
//! parallel; their outputs do not depend on scheduling.

pub mod basic;
pub mod calendar;
pub mod insights;
pub mod outliers;
pub mod seasonality;
pub mod thresholds;
pub mod trend;
pub mod volatility;

pub use basic::compute_basic_stats;
pub use insights::{annualized_growth_pct, synthesize_insights};
pub use outliers::{detect_outliers, IqrFences};
pub use seasonality::analyze_seasonality;
pub use trend::{analyze_trend, segment_trend};
pub use volatility::analyze_volatility;

use crate::domain::{Sample, SeriesAnalysis};

/// Run the full pipeline.
///
/// Returns `None` when the series has fewer than two samples; callers should
/// surface that as "insufficient data" rather than as a failure.
pub fn analyze(series: &[Sample]) -> Option<SeriesAnalysis> {
    let Some(basic_stats) = compute_basic_stats(series) else {
        tracing::debug!(samples = series.len(), "series too short to analyze");
        return None;
    };
    let values: Vec<f64> = series.iter().map(|s| s.value).collect();
    let (mean, std_dev) = (basic_stats.mean, basic_stats.std_dev);

    let ((trend, seasonality), (volatility, outliers)) = rayon::join(
        || {
            rayon::join(
                || analyze_trend(series, &values),
                || analyze_seasonality(series),
            )
        },
        || {
            rayon::join(
                || analyze_volatility(series, &values, mean, std_dev),
                || detect_outliers(series, &values, mean, std_dev),
            )
        },
    );

    let insights = synthesize_insights(&basic_stats, &trend);

    tracing::debug!(
        samples = basic_stats.count,
        direction = trend.direction.label(),
        volatility = volatility.level.label(),
        seasonal = seasonality.has_seasonality,
        outliers = outliers.outliers.len(),
        "series analyzed"
    );

    Some(SeriesAnalysis {
        basic_stats,
        trend,
        seasonality,
        volatility,
        outliers,
        insights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OutlierKind, TrendDirection, TrendStrength, VolatilityLevel};
    use chrono::NaiveDate;

    fn monthly(values: &[f64]) -> Vec<Sample> {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new(start + chrono::Months::new(i as u32), v))
            .collect()
    }

    /// 36 months rising 100 -> 150 with small deterministic noise.
    fn rising_with_noise() -> Vec<f64> {
        const NOISE: [f64; 5] = [1.5, -1.0, 0.5, -1.5, 1.0];
        let n = 36;
        (0..n)
            .map(|i| {
                let base = 100.0 + 50.0 * i as f64 / (n - 1) as f64;
                let noise = if i == 0 || i == n - 1 { 0.0 } else { NOISE[i % NOISE.len()] };
                base + noise
            })
            .collect()
    }

    #[test]
    fn short_series_is_insufficient_not_a_fault() {
        assert!(analyze(&[]).is_none());
        assert!(analyze(&monthly(&[1.0])).is_none());
        assert!(analyze(&monthly(&[1.0, 2.0])).is_some());
    }

    #[test]
    fn constant_series() {
        let analysis = analyze(&monthly(&[25.0; 18])).unwrap();
        assert_eq!(analysis.trend.confidence, 1.0);
        assert_eq!(analysis.trend.direction, TrendDirection::Stable);
        assert_eq!(analysis.volatility.level, VolatilityLevel::Low);
        assert!(analysis.outliers.outliers.is_empty());
        assert!(!analysis.outliers.has_significant_outliers);
    }

    #[test]
    fn perfectly_linear_series_is_strong() {
        // slope 1 against a mean of 5.5 clears the 10 % bar
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let analysis = analyze(&monthly(&values)).unwrap();
        assert_eq!(analysis.trend.direction, TrendDirection::Increasing);
        assert_eq!(analysis.trend.strength, TrendStrength::Strong);
        assert!(analysis.trend.confidence > 0.999);
    }

    #[test]
    fn spike_series_surfaces_one_flag_at_spike() {
        let series = monthly(&[10.0, 10.0, 10.0, 10.0, 100.0, 10.0, 10.0, 10.0]);
        let analysis = analyze(&series).unwrap();
        let at_spike: Vec<_> = analysis
            .outliers
            .outliers
            .iter()
            .filter(|o| o.date == series[4].date)
            .collect();
        assert_eq!(at_spike.len(), 1);
        assert_eq!(at_spike[0].kind, OutlierKind::Peak);
    }

    #[test]
    fn twelve_months_never_seasonal() {
        let values: Vec<f64> = (0..12).map(|i| if i % 2 == 0 { 10.0 } else { 90.0 }).collect();
        let analysis = analyze(&monthly(&values)).unwrap();
        assert!(!analysis.seasonality.has_seasonality);
        assert!(analysis.seasonality.description.unwrap().starts_with("Insufficient data"));
    }

    #[test]
    fn rising_series_end_to_end() {
        let analysis = analyze(&monthly(&rising_with_noise())).unwrap();
        let stats = &analysis.basic_stats;
        assert_eq!(stats.count, 36);
        assert!((stats.net_change - 50.0).abs() < 1e-9);
        assert!((stats.percentage_change - 50.0).abs() < 1e-9);
        assert_eq!(stats.time_span_months, 35);

        assert_eq!(analysis.trend.direction, TrendDirection::Increasing);
        assert!(analysis.trend.confidence > 0.95);
        // slope ~1.43 per step against a level of ~125
        assert_eq!(analysis.trend.strength, TrendStrength::Weak);
        assert_eq!(analysis.trend.segments.len(), 3);

        assert!(!analysis.seasonality.has_seasonality);
        // a 100 -> 150 ramp spreads ~11.5 % around its mean
        assert_eq!(analysis.volatility.level, VolatilityLevel::Medium);
        assert_eq!(analysis.volatility.periods.len(), 2);
        assert!(!analysis.outliers.has_significant_outliers);

        let insights = &analysis.insights;
        assert!(insights.correlation[0].contains("spans 2.9 years"));
        assert!(insights.correlation.iter().any(|l| l.contains("annualized growth rate")));
        assert!(insights.economic_context.iter().any(|l| l.contains("total change of 50.0%")));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let series = monthly(&rising_with_noise());
        let a = serde_json::to_string(&analyze(&series)).unwrap();
        let b = serde_json::to_string(&analyze(&series)).unwrap();
        assert_eq!(a, b);
    }
}

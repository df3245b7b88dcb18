//! Formatted terminal output for an analysis.
//!
//! All formatting lives here so the analysis code stays free of presentation
//! concerns and output changes are localized.

use crate::analysis::calendar::{month_year, month_year_range};
use crate::domain::{SeriesAnalysis, TrendSegment};

/// Format the full analysis summary.
pub fn format_analysis(indicator: &str, unit: Option<&str>, analysis: &SeriesAnalysis) -> String {
    let stats = &analysis.basic_stats;
    let trend = &analysis.trend;
    let volatility = &analysis.volatility;
    let seasonality = &analysis.seasonality;
    let outliers = &analysis.outliers;
    let mut out = String::new();

    out.push_str(&format!("=== insight - {indicator} ===\n"));
    if let Some(unit) = unit {
        out.push_str(&format!("Unit: {unit}\n"));
    }
    out.push_str(&format!(
        "Span: {} ({} points over ~{:.1} years)\n",
        month_year_range(stats.start_date, stats.end_date),
        stats.count,
        f64::from(stats.time_span_months) / 12.0,
    ));

    out.push_str("\nCore statistics:\n");
    out.push_str(&format!(
        "- start={:.2} end={:.2} net={:.2} ({:.1}%)\n",
        stats.start_value, stats.end_value, stats.net_change, stats.percentage_change
    ));
    out.push_str(&format!("- mean={:.2} median={:.2}\n", stats.mean, stats.median));
    out.push_str(&format!(
        "- min={:.2} ({}) max={:.2} ({})\n",
        stats.min_value,
        month_year(stats.min_date),
        stats.max_value,
        month_year(stats.max_date)
    ));
    out.push_str(&format!(
        "- std_dev={:.2} cv={:.1}%\n",
        stats.std_dev, stats.coefficient_of_variation
    ));

    out.push_str("\nTrend:\n");
    out.push_str(&format!(
        "- {} (strength: {}, R²: {:.1}%)\n",
        trend.direction.label(),
        trend.strength.label(),
        trend.confidence * 100.0
    ));
    if trend.segments.is_empty() {
        out.push_str("  (too few points for segment analysis)\n");
    }
    for segment in &trend.segments {
        out.push_str(&format!("  {}\n", format_segment(segment)));
    }

    out.push_str("\nVolatility:\n");
    out.push_str(&format!(
        "- {} (cv={:.1}%)\n",
        volatility.level.label(),
        volatility.coefficient
    ));
    for period in &volatility.periods {
        out.push_str(&format!(
            "  {}: {} (cv={:.1}%)\n",
            period.period, period.description, period.volatility
        ));
    }

    out.push_str("\nSeasonality:\n");
    match (seasonality.has_seasonality, seasonality.pattern, seasonality.strength) {
        (true, Some(pattern), Some(strength)) => {
            out.push_str(&format!(
                "- detected ({}) strength={:.1}%\n",
                pattern.label(),
                strength * 100.0
            ));
        }
        _ => out.push_str("- not detected\n"),
    }
    if let Some(description) = &seasonality.description {
        out.push_str(&format!("  {description}\n"));
    }

    out.push_str("\nOutliers:\n");
    if outliers.has_significant_outliers {
        out.push_str(&format!("- {} shown\n", outliers.outliers.len()));
    } else {
        out.push_str("- none\n");
    }
    for o in &outliers.outliers {
        out.push_str(&format!(
            "  {} {:<8} {:>12.2} score={:.2}  {}\n",
            month_year(o.date),
            o.kind.label(),
            o.value,
            o.significance,
            o.context
        ));
    }

    let insights = &analysis.insights;
    if !insights.correlation.is_empty() || !insights.economic_context.is_empty() {
        out.push_str("\nInsights:\n");
        for line in insights.correlation.iter().chain(&insights.economic_context) {
            out.push_str(&format!("- {line}\n"));
        }
    }

    out
}

/// Message shown when a series is too short to analyze.
pub fn format_insufficient(indicator: &str, samples: usize) -> String {
    format!(
        "{indicator}: insufficient data for analysis ({samples} usable point(s), need at least 2)."
    )
}

fn format_segment(segment: &TrendSegment) -> String {
    let change = match segment.change_pct {
        Some(pct) => format!("{pct:.1}%"),
        None => "undefined (from zero)".to_string(),
    };
    format!(
        "{}: {} ({} change, {} significance)",
        segment.period,
        segment.trend,
        change,
        segment.significance.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::domain::{Sample, Significance};
    use chrono::NaiveDate;

    fn sample_analysis() -> SeriesAnalysis {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let values = [10.0, 10.0, 10.0, 10.0, 100.0, 10.0, 10.0, 10.0, 11.0];
        let series: Vec<Sample> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new(start + chrono::Months::new(i as u32), v))
            .collect();
        analyze(&series).unwrap()
    }

    #[test]
    fn summary_has_every_section() {
        let text = format_analysis("Unemployment rate", Some("%"), &sample_analysis());
        for header in ["Core statistics:", "Trend:", "Volatility:", "Seasonality:", "Outliers:"] {
            assert!(text.contains(header), "missing {header}");
        }
        assert!(text.starts_with("=== insight - Unemployment rate ===\nUnit: %\n"));
        assert!(text.contains("Span: Jan 2020 - Sep 2020 (9 points"));
        assert!(text.contains("May 2020 peak"));
    }

    #[test]
    fn undefined_segment_change_is_spelled_out() {
        let segment = TrendSegment {
            period: "Jan 2020 - Mar 2020".to_string(),
            trend: "strong increase".to_string(),
            change_pct: None,
            significance: Significance::High,
        };
        assert_eq!(
            format_segment(&segment),
            "Jan 2020 - Mar 2020: strong increase (undefined (from zero) change, high significance)"
        );
    }

    #[test]
    fn insufficient_message() {
        assert!(format_insufficient("GDP", 1).contains("1 usable point(s)"));
    }
}

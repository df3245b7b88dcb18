//! Rule-based observations derived from the basic stats and the trend.

use crate::analysis::thresholds::{
    GROWTH_MIN_MONTHS, GROWTH_NOTABLE_PCT, HIGH_STABILITY_CV, NOTABLE_VOLATILITY_CV,
    SPAN_MONTHS_MONTHS, SPAN_YEARS_MONTHS, SUBSTANTIAL_CHANGE_MIN_MONTHS, SUBSTANTIAL_CHANGE_PCT,
};
use crate::domain::{BasicStats, InsightSet, TrendDirection, TrendReport, TrendStrength};

pub fn synthesize_insights(stats: &BasicStats, trend: &TrendReport) -> InsightSet {
    InsightSet {
        correlation: correlation_insights(stats),
        economic_context: economic_context(stats, trend),
    }
}

/// Compound annual growth in percent, when at least a year of data starts off zero.
///
/// `None` also covers sign changes, where a fractional power has no real value.
pub fn annualized_growth_pct(stats: &BasicStats) -> Option<f64> {
    if !growth_is_defined(stats) {
        return None;
    }
    let ratio = stats.end_value / stats.start_value;
    let growth = (ratio.powf(12.0 / f64::from(stats.time_span_months)) - 1.0) * 100.0;
    growth.is_finite().then_some(growth)
}

fn growth_is_defined(stats: &BasicStats) -> bool {
    stats.time_span_months >= GROWTH_MIN_MONTHS && stats.start_value != 0.0
}

fn correlation_insights(stats: &BasicStats) -> Vec<String> {
    let mut out = Vec::new();
    let months = stats.time_span_months;

    if months > SPAN_YEARS_MONTHS {
        out.push(format!(
            "The dataset spans {:.1} years, allowing for observation of medium-term trends.",
            f64::from(months) / 12.0
        ));
    } else if months > SPAN_MONTHS_MONTHS {
        out.push(format!(
            "The dataset covers {months} months, suitable for short-term analysis."
        ));
    }

    if growth_is_defined(stats) {
        // A rate with no real value reads as stable, like any small rate.
        match annualized_growth_pct(stats).filter(|g| g.abs() > GROWTH_NOTABLE_PCT) {
            Some(growth) => {
                let word = if growth > 0.0 { "growth" } else { "decline" };
                out.push(format!(
                    "The indicator shows an approximate annualized {word} rate of {growth:.1}%."
                ));
            }
            None => out.push(
                "The indicator shows a relatively stable annualized rate of change.".to_string(),
            ),
        }
    }

    let cv = stats.coefficient_of_variation;
    if cv < HIGH_STABILITY_CV {
        out.push("Overall data stability is high (low coefficient of variation).".to_string());
    } else if cv > NOTABLE_VOLATILITY_CV {
        out.push(
            "Overall data shows notable volatility (high coefficient of variation).".to_string(),
        );
    }

    out
}

fn economic_context(stats: &BasicStats, trend: &TrendReport) -> Vec<String> {
    let mut out = Vec::new();

    match (trend.direction, trend.strength) {
        (TrendDirection::Increasing, TrendStrength::Strong) => out.push(
            "A strong, sustained upward trend often signifies positive economic momentum or growing demand/activity."
                .to_string(),
        ),
        (TrendDirection::Decreasing, TrendStrength::Strong) => out.push(
            "A strong, sustained downward trend may indicate underlying economic challenges or contracting activity."
                .to_string(),
        ),
        (TrendDirection::Volatile, _) => out.push(
            "Observed volatility can reflect periods of economic uncertainty, policy shifts, or external shocks."
                .to_string(),
        ),
        _ => {}
    }

    if stats.percentage_change.abs() > SUBSTANTIAL_CHANGE_PCT
        && stats.time_span_months >= SUBSTANTIAL_CHANGE_MIN_MONTHS
    {
        out.push(format!(
            "A total change of {:.1}% over the period suggests a substantial shift in the indicator's dynamics.",
            stats.percentage_change
        ));
    }

    out
}

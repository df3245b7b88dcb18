//! Linear trend classification and piecewise segmentation.
//!
//! The fit is against the sample index, not calendar time, so irregular
//! spacing between dates does not change the slope.

use crate::analysis::calendar::month_year_range;
use crate::analysis::thresholds::{
    MIN_SAMPLES, MODERATE_R_SQUARED, MODERATE_SLOPE_RATIO, SEGMENT_HIGH_PCT, SEGMENT_LOW_PCT,
    SEGMENT_MAX_SIZE, SEGMENT_MEDIUM_PCT, SEGMENT_MIN_SERIES, SEGMENT_MIN_SIZE, SEGMENT_MIN_TAIL,
    STABLE_SLOPE, STRONG_R_SQUARED, STRONG_SLOPE_RATIO, VOLATILE_RESIDUAL_PCT,
};
use crate::domain::{
    Sample, Significance, TrendDirection, TrendReport, TrendSegment, TrendStrength,
};
use crate::math::{fit_index_line, mean, percent_of};

/// Fit, classify and segment the series.
pub fn analyze_trend(series: &[Sample], values: &[f64]) -> TrendReport {
    let n = values.len();
    if n < MIN_SAMPLES {
        return TrendReport::trivial();
    }

    let line = fit_index_line(values);
    let y_mean = mean(values);

    let residuals: Vec<f64> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| v - line.predict(i))
        .collect();
    let ss_res: f64 = residuals.iter().map(|r| r * r).sum();
    let ss_tot: f64 = values.iter().map(|v| (v - y_mean).powi(2)).sum();
    let r_squared = if ss_tot == 0.0 { 1.0 } else { (1.0 - ss_res / ss_tot).max(0.0) };

    let dof = if n > 2 { n - 2 } else { 1 };
    let residual_sd = (ss_res / dof as f64).sqrt();
    let relative_volatility = percent_of(residual_sd, y_mean.abs());

    let direction = classify_direction(line.slope, relative_volatility);
    let strength = classify_strength(r_squared, line.slope, y_mean);

    tracing::debug!(
        slope = line.slope,
        r_squared,
        relative_volatility,
        direction = direction.label(),
        strength = strength.label(),
        "trend fitted"
    );

    TrendReport {
        direction,
        strength,
        confidence: r_squared,
        segments: segment_trend(series, values),
    }
}

fn classify_direction(slope: f64, relative_volatility: f64) -> TrendDirection {
    if relative_volatility > VOLATILE_RESIDUAL_PCT {
        return TrendDirection::Volatile;
    }
    if slope.abs() <= STABLE_SLOPE {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    }
}

fn classify_strength(r_squared: f64, slope: f64, y_mean: f64) -> TrendStrength {
    let slope = slope.abs();
    let scale = y_mean.abs();
    if r_squared > STRONG_R_SQUARED && slope > STRONG_SLOPE_RATIO * scale {
        TrendStrength::Strong
    } else if r_squared > MODERATE_R_SQUARED && slope > MODERATE_SLOPE_RATIO * scale {
        TrendStrength::Moderate
    } else {
        TrendStrength::Weak
    }
}

/// Chop the series into fixed-size chunks and describe each one.
pub fn segment_trend(series: &[Sample], values: &[f64]) -> Vec<TrendSegment> {
    let n = values.len().min(series.len());
    if n < SEGMENT_MIN_SERIES {
        return Vec::new();
    }
    let size = segment_size(n);

    (0..n)
        .step_by(size)
        .map(|start| (start, (start + size).min(n)))
        .filter(|(start, end)| end - start >= SEGMENT_MIN_TAIL)
        .map(|(start, end)| {
            let change_pct = segment_change(values[start], values[end - 1]);
            let (trend, significance) = describe_change(change_pct, values[end - 1]);
            TrendSegment {
                period: month_year_range(series[start].date, series[end - 1].date),
                trend,
                change_pct,
                significance,
            }
        })
        .collect()
}

/// Chunk length for a series of `n` samples.
pub fn segment_size(n: usize) -> usize {
    (n / 3).clamp(SEGMENT_MIN_SIZE, SEGMENT_MAX_SIZE)
}

/// Relative change, undefined when starting from exactly 0 and moving away.
fn segment_change(start: f64, end: f64) -> Option<f64> {
    if start != 0.0 {
        Some((end - start) / start.abs() * 100.0)
    } else if end != 0.0 {
        None
    } else {
        Some(0.0)
    }
}

fn describe_change(change_pct: Option<f64>, end: f64) -> (String, Significance) {
    let Some(change) = change_pct else {
        // Leaving zero is an unbounded move in the direction of the end value.
        let trend = if end > 0.0 { "strong increase" } else { "strong decrease" };
        return (trend.to_string(), Significance::High);
    };

    let rising = change > 0.0;
    let (trend, significance) = match change.abs() {
        c if c > SEGMENT_HIGH_PCT => (pick(rising, "strong"), Significance::High),
        c if c > SEGMENT_MEDIUM_PCT => (pick(rising, "moderate"), Significance::Medium),
        c if c > SEGMENT_LOW_PCT => (pick(rising, "slight"), Significance::Low),
        _ => ("stable".to_string(), Significance::Low),
    };
    (trend, significance)
}

fn pick(rising: bool, adjective: &str) -> String {
    let noun = if rising { "increase" } else { "decrease" };
    format!("{adjective} {noun}")
}

//! Month-of-year seasonality check.
//!
//! Values are bucketed by calendar month irrespective of year; the dispersion
//! of the twelve bucket averages relative to their mean is the seasonal strength.

use chrono::Datelike;

use crate::analysis::thresholds::{MONTHS_PER_YEAR, SEASONALITY_MIN_SAMPLES, SEASONAL_STRENGTH};
use crate::domain::{Sample, SeasonalPattern, SeasonalityReport};
use crate::math::{mean, population_std_dev};

const TOO_FEW_SAMPLES: &str =
    "Insufficient data for robust seasonality analysis (requires at least 2 full cycles).";
const MISSING_MONTHS: &str = "Data does not cover all months consistently for seasonality.";
const NO_PATTERN: &str =
    "No strong, consistent monthly seasonal pattern detected with this basic analysis.";

pub fn analyze_seasonality(series: &[Sample]) -> SeasonalityReport {
    if series.len() < SEASONALITY_MIN_SAMPLES {
        return not_seasonal(TOO_FEW_SAMPLES);
    }

    let Some(averages) = monthly_averages(series) else {
        return not_seasonal(MISSING_MONTHS);
    };

    let strength = seasonal_strength(&averages);
    tracing::debug!(strength, "seasonal strength computed");

    if strength > SEASONAL_STRENGTH {
        SeasonalityReport {
            has_seasonality: true,
            pattern: Some(SeasonalPattern::Monthly),
            strength: Some(strength),
            description: Some(format!(
                "Suggestive monthly pattern with a seasonal strength coefficient of {:.1}%.",
                strength * 100.0
            )),
        }
    } else {
        not_seasonal(NO_PATTERN)
    }
}

/// Average value per calendar month, or `None` if any month is unobserved.
fn monthly_averages(series: &[Sample]) -> Option<[f64; MONTHS_PER_YEAR]> {
    let mut sums = [0.0; MONTHS_PER_YEAR];
    let mut counts = [0usize; MONTHS_PER_YEAR];
    for sample in series {
        let month = sample.date.month0() as usize;
        sums[month] += sample.value;
        counts[month] += 1;
    }

    let mut averages = [0.0; MONTHS_PER_YEAR];
    for month in 0..MONTHS_PER_YEAR {
        if counts[month] == 0 {
            return None;
        }
        averages[month] = sums[month] / counts[month] as f64;
    }
    Some(averages)
}

/// Std-dev of the month averages over `|their mean|`; 0 when the mean is 0.
fn seasonal_strength(averages: &[f64]) -> f64 {
    let overall = mean(averages);
    if overall == 0.0 {
        return 0.0;
    }
    population_std_dev(averages, overall) / overall.abs()
}

fn not_seasonal(description: &str) -> SeasonalityReport {
    SeasonalityReport {
        has_seasonality: false,
        pattern: None,
        strength: None,
        description: Some(description.to_string()),
    }
}

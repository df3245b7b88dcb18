//! Basic descriptive statistics for a whole series.

use crate::analysis::calendar::months_between;
use crate::analysis::thresholds::MIN_SAMPLES;
use crate::domain::{BasicStats, Sample};
use crate::math::{mean, median_of_sorted, percent_of, population_std_dev, sorted};

/// Compute the descriptive snapshot, or `None` for fewer than two samples.
pub fn compute_basic_stats(series: &[Sample]) -> Option<BasicStats> {
    if series.len() < MIN_SAMPLES {
        return None;
    }
    let first = series.first()?;
    let last = series.last()?;

    let values: Vec<f64> = series.iter().map(|s| s.value).collect();
    let avg = mean(&values);
    let std_dev = population_std_dev(&values, avg);
    let median = median_of_sorted(&sorted(&values));

    let min_idx = extreme_index(&values, |candidate, best| candidate < best);
    let max_idx = extreme_index(&values, |candidate, best| candidate > best);

    let net_change = last.value - first.value;

    Some(BasicStats {
        count: series.len(),
        start_date: first.date,
        end_date: last.date,
        start_value: first.value,
        end_value: last.value,
        min_value: values[min_idx],
        min_date: series[min_idx].date,
        max_value: values[max_idx],
        max_date: series[max_idx].date,
        mean: avg,
        median,
        std_dev,
        coefficient_of_variation: percent_of(std_dev, avg),
        net_change,
        percentage_change: percent_of(net_change, first.value.abs()),
        time_span_days: (last.date - first.date).num_days(),
        time_span_months: months_between(first.date, last.date),
    })
}

/// Index of the first element that no later element beats.
fn extreme_index(values: &[f64], beats: impl Fn(f64, f64) -> bool) -> usize {
    let mut best = 0;
    for (idx, &v) in values.iter().enumerate().skip(1) {
        if beats(v, values[best]) {
            best = idx;
        }
    }
    best
}

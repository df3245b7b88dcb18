//! Descriptive statistics over plain value slices.
//!
//! Every helper is total: empty input and zero denominators produce 0 rather
//! than NaN or infinity.

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation around a precomputed mean.
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Ascending copy of `values`.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    out
}

/// Median of an ascending slice; 0 for an empty slice.
pub fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// `numer / denom × 100`, or 0 when `denom` is exactly 0.
pub fn percent_of(numer: f64, denom: f64) -> f64 {
    if denom == 0.0 { 0.0 } else { numer / denom * 100.0 }
}

/// Coefficient of variation against the absolute mean, in percent.
pub fn abs_coefficient_of_variation(std_dev: f64, mean: f64) -> f64 {
    percent_of(std_dev, mean.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_even_and_odd() {
        assert_eq!(median_of_sorted(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(median_of_sorted(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(median_of_sorted(&[]), 0.0);
    }

    #[test]
    fn sorted_does_not_touch_input() {
        let values = [3.0, 1.0, 2.0];
        assert_eq!(sorted(&values), vec![1.0, 2.0, 3.0]);
        assert_eq!(values, [3.0, 1.0, 2.0]);
    }

    #[test]
    fn population_std_dev_known_value() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert_eq!(m, 5.0);
        assert!((population_std_dev(&values, m) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_denominators_fall_back_to_zero() {
        assert_eq!(percent_of(5.0, 0.0), 0.0);
        assert_eq!(abs_coefficient_of_variation(1.0, 0.0), 0.0);
        assert_eq!(abs_coefficient_of_variation(1.0, -4.0), 25.0);
        assert_eq!(mean(&[]), 0.0);
    }
}

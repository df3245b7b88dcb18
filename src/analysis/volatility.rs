//! Dispersion of the whole series and of its two halves.

use crate::analysis::calendar::month_year_range;
use crate::analysis::thresholds::{
    HALF_SPLIT_MIN_SAMPLES, PERIOD_MIN_SAMPLES, VOLATILITY_HIGH_CV, VOLATILITY_MEDIUM_CV,
};
use crate::domain::{Sample, VolatilityLevel, VolatilityPeriod, VolatilityReport};
use crate::math::{abs_coefficient_of_variation, mean, population_std_dev};

/// `mean` and `std_dev` are the whole-series figures from the basic stats.
pub fn analyze_volatility(
    series: &[Sample],
    values: &[f64],
    mean_value: f64,
    std_dev: f64,
) -> VolatilityReport {
    let coefficient = abs_coefficient_of_variation(std_dev, mean_value);
    let level = if coefficient > VOLATILITY_HIGH_CV {
        VolatilityLevel::High
    } else if coefficient > VOLATILITY_MEDIUM_CV {
        VolatilityLevel::Medium
    } else {
        VolatilityLevel::Low
    };

    let n = values.len().min(series.len());
    let mut periods = Vec::new();
    if n >= HALF_SPLIT_MIN_SAMPLES {
        let mid = n / 2;
        let halves = [("first half", 0..mid), ("second half", mid..n)];
        for (label, range) in halves {
            if range.len() < PERIOD_MIN_SAMPLES {
                continue;
            }
            let part = &values[range.clone()];
            let dates = &series[range];
            let part_mean = mean(part);
            let cv = abs_coefficient_of_variation(population_std_dev(part, part_mean), part_mean);
            periods.push(VolatilityPeriod {
                period: format!(
                    "Period covering {label} ({})",
                    month_year_range(dates[0].date, dates[dates.len() - 1].date)
                ),
                volatility: cv,
                description: describe_period(cv).to_string(),
            });
        }
    }

    VolatilityReport {
        level,
        coefficient,
        periods,
    }
}

fn describe_period(cv: f64) -> &'static str {
    if cv > VOLATILITY_HIGH_CV {
        "highly volatile"
    } else if cv > VOLATILITY_MEDIUM_CV {
        "moderately volatile"
    } else {
        "stable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn run(values: &[f64]) -> VolatilityReport {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let series: Vec<Sample> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new(start + chrono::Months::new(i as u32), v))
            .collect();
        let m = mean(values);
        analyze_volatility(&series, values, m, population_std_dev(values, m))
    }

    #[test]
    fn constant_series_is_low() {
        let report = run(&[7.0; 8]);
        assert_eq!(report.level, VolatilityLevel::Low);
        assert_eq!(report.coefficient, 0.0);
        assert_eq!(report.periods.len(), 2);
        assert!(report.periods.iter().all(|p| p.description == "stable"));
    }

    #[test]
    fn short_series_has_no_periods() {
        let report = run(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(report.periods.is_empty());
    }

    #[test]
    fn halves_are_independent() {
        // calm first half, wild second half
        let report = run(&[100.0, 101.0, 99.0, 100.0, 10.0, 200.0, 20.0, 180.0]);
        assert_eq!(report.level, VolatilityLevel::High);
        assert_eq!(report.periods[0].description, "stable");
        assert_eq!(report.periods[0].period, "Period covering first half (Jan 2022 - Apr 2022)");
        assert_eq!(report.periods[1].description, "highly volatile");
        assert_eq!(report.periods[1].period, "Period covering second half (May 2022 - Aug 2022)");
    }

    #[test]
    fn odd_length_puts_extra_sample_in_second_half() {
        let report = run(&[1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0]);
        assert!(report.periods[0].period.contains("Jan 2022 - Mar 2022"));
        assert!(report.periods[1].period.contains("Apr 2022 - Jul 2022"));
    }

    #[test]
    fn medium_tier() {
        // mean 100, population sd 15 -> cv 15
        let report = run(&[85.0, 115.0, 85.0, 115.0]);
        assert_eq!(report.level, VolatilityLevel::Medium);
        assert!((report.coefficient - 15.0).abs() < 1e-9);
    }

    #[test]
    fn negative_mean_uses_absolute_value() {
        let report = run(&[-85.0, -115.0, -85.0, -115.0]);
        assert!((report.coefficient - 15.0).abs() < 1e-9);
    }
}

//! Distribution outliers (IQR fences) and sudden point-to-point jumps.
//!
//! Both detectors feed one full list. The presence flag is taken from that
//! list before it is cut down to the reported top entries, so the flag can be
//! true while fewer flags are shown than were raised.

use crate::analysis::thresholds::{ANOMALY_JUMP_PCT, IQR_MULTIPLIER, MAX_REPORTED_OUTLIERS};
use crate::domain::{Outlier, OutlierKind, OutlierReport, Sample};
use crate::math::sorted;

/// Inclusive fences outside of which a value is a distribution outlier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrFences {
    pub lower: f64,
    pub upper: f64,
}

impl IqrFences {
    /// Quartiles by plain order-statistic indexing (`n/4`, `3n/4`), no interpolation.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sorted = sorted(values);
        let n = sorted.len();
        let q1 = sorted[n / 4];
        let q3 = sorted[(n * 3 / 4).min(n - 1)];
        let iqr = q3 - q1;
        Some(Self {
            lower: q1 - IQR_MULTIPLIER * iqr,
            upper: q3 + IQR_MULTIPLIER * iqr,
        })
    }
}

pub fn detect_outliers(
    series: &[Sample],
    values: &[f64],
    mean: f64,
    std_dev: f64,
) -> OutlierReport {
    let n = values.len().min(series.len());
    let values = &values[..n];
    let mut flagged = Vec::new();

    if let Some(fences) = IqrFences::from_values(values) {
        for (sample, &value) in series.iter().zip(values) {
            let kind = if value > fences.upper {
                OutlierKind::Peak
            } else if value < fences.lower {
                OutlierKind::Trough
            } else {
                continue;
            };
            let significance = if std_dev == 0.0 { 0.0 } else { (value - mean).abs() / std_dev };
            flagged.push(Outlier {
                date: sample.date,
                value,
                kind,
                significance,
                context: format!(
                    "Value is outside IQR bounds (Lower: {:.2}, Upper: {:.2})",
                    fences.lower, fences.upper
                ),
            });
        }
    }

    for i in 1..n.saturating_sub(1) {
        let prev = values[i - 1];
        if prev == 0.0 {
            continue;
        }
        let jump = (values[i] - prev).abs() / prev.abs() * 100.0;
        if jump <= ANOMALY_JUMP_PCT {
            continue;
        }
        let date = series[i].date;
        let covered = flagged
            .iter()
            .any(|o| o.date == date && o.kind != OutlierKind::Anomaly);
        if covered {
            continue;
        }
        flagged.push(Outlier {
            date,
            value: values[i],
            kind: OutlierKind::Anomaly,
            significance: jump,
            context: format!("Sudden change of {jump:.1}% from previous point."),
        });
    }

    let has_significant_outliers = !flagged.is_empty();
    tracing::debug!(raised = flagged.len(), "outlier scan finished");

    // Stable sort keeps detection order among equal scores.
    flagged.sort_by(|a, b| {
        b.significance
            .partial_cmp(&a.significance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    flagged.truncate(MAX_REPORTED_OUTLIERS);

    OutlierReport {
        outliers: flagged,
        has_significant_outliers,
    }
}

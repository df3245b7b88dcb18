//! Least squares helpers.
//!
//! The trend stage regresses values against their position in the series:
//!
//! ```text
//! minimize Σ (y_i - (a + b·i))^2,   i = 0..n-1
//! ```
//!
//! We solve it through the same SVD path as any other small least-squares
//! problem. The design matrix has only two columns, so the cost is linear in `n`.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Straight line fitted against the sample index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexLine {
    pub intercept: f64,
    pub slope: f64,
}

impl IndexLine {
    pub fn predict(&self, index: usize) -> f64 {
        self.intercept + self.slope * index as f64
    }
}

/// Fit `value = intercept + slope · index` by ordinary least squares.
///
/// With fewer than two values the slope is 0 and the intercept is the mean
/// (or 0 for an empty slice).
pub fn fit_index_line(values: &[f64]) -> IndexLine {
    let n = values.len();
    let mean = if n == 0 { 0.0 } else { values.iter().sum::<f64>() / n as f64 };
    let flat = IndexLine {
        intercept: mean,
        slope: 0.0,
    };
    if n < 2 {
        return flat;
    }

    let x = DMatrix::from_fn(n, 2, |row, col| if col == 0 { 1.0 } else { row as f64 });
    let y = DVector::from_column_slice(values);

    match solve_least_squares(&x, &y) {
        Some(beta) => IndexLine {
            intercept: beta[0],
            slope: beta[1],
        },
        None => flat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn index_line_recovers_exact_line() {
        let values: Vec<f64> = (0..10).map(|i| 4.0 - 0.5 * i as f64).collect();
        let line = fit_index_line(&values);
        assert!((line.intercept - 4.0).abs() < 1e-9);
        assert!((line.slope + 0.5).abs() < 1e-9);
        assert!((line.predict(4) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn index_line_degenerate_inputs_are_flat() {
        assert_eq!(fit_index_line(&[]).slope, 0.0);
        let one = fit_index_line(&[7.0]);
        assert_eq!(one.slope, 0.0);
        assert_eq!(one.intercept, 7.0);
    }

    #[test]
    fn index_line_on_constant_series_has_no_slope() {
        let line = fit_index_line(&[3.0; 8]);
        assert!(line.slope.abs() < 1e-9);
        assert!((line.intercept - 3.0).abs() < 1e-9);
    }
}

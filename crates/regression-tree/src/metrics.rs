//! Regression Evaluation Metrics

use serde::Serialize;

/// Held-out evaluation summary for a fitted model.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// Mean absolute error on the test set
    pub mae: f64,
    /// Coefficient of determination on the test set
    pub r2: f64,
    /// Number of test rows
    pub n_test: usize,
}

impl Evaluation {
    /// Score predictions against their true targets.
    pub fn compute(y_true: &[f64], y_pred: &[f64]) -> Self {
        Self {
            mae: mean_absolute_error(y_true, y_pred),
            r2: r2_score(y_true, y_pred),
            n_test: y_true.len(),
        }
    }
}

/// Average absolute difference between targets and predictions.
pub fn mean_absolute_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).abs())
        .sum::<f64>()
        / y_true.len() as f64
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// A constant target column has no variance to explain; 0 is returned
/// rather than dividing by zero.
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return 0.0;
    }
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mae() {
        let y_true = [100.0, 200.0, 300.0];
        let y_pred = [110.0, 190.0, 300.0];
        assert!((mean_absolute_error(&y_true, &y_pred) - 20.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_predictions() {
        let y = [1.0, 2.0, 3.0];
        assert_eq!(mean_absolute_error(&y, &y), 0.0);
        assert_eq!(r2_score(&y, &y), 1.0);
    }

    #[test]
    fn test_r2_of_mean_prediction_is_zero() {
        let y_true = [1.0, 2.0, 3.0];
        let y_pred = [2.0, 2.0, 2.0];
        assert!(r2_score(&y_true, &y_pred).abs() < 1e-9);
    }

    #[test]
    fn test_constant_target_guard() {
        let y_true = [5.0, 5.0];
        let y_pred = [4.0, 6.0];
        assert_eq!(r2_score(&y_true, &y_pred), 0.0);
    }
}

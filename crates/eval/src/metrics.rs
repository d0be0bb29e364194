//! Error metrics comparing true labels with predictions.
//!
//! The evaluation harness only depends on the [`Metric`] trait, so any scalar
//! loss can be injected: one of the usual [`ErrorMetric`]s or a custom
//! function wrapped in a [`FnMetric`]. Lower is better for all of them.
use crate::errors::{EvalError, Result};
use ndarray::ArrayView1;
use std::fmt;
use std::str::FromStr;

/// A trait for scalar error metrics
pub trait Metric {
    /// Short name used in reports
    fn name(&self) -> &str;

    /// Compute the error between `y_true` and `y_pred`.
    ///
    /// Both vectors must have the same length, an empty pair scores `0`.
    fn score(&self, y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64>;
}

impl<M: Metric + ?Sized> Metric for &M {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn score(&self, y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
        (**self).score(y_true, y_pred)
    }
}

impl<M: Metric + ?Sized> Metric for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn score(&self, y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
        (**self).score(y_true, y_pred)
    }
}

fn check_lengths(y_true: &ArrayView1<f64>, y_pred: &ArrayView1<f64>) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(EvalError::ShapeMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
        });
    }
    Ok(())
}

/// Usual regression error metrics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorMetric {
    /// `mean(|y_true - y_pred|)`
    MeanAbsolute,
    /// `mean((y_true - y_pred)^2)`
    MeanSquared,
    /// `sqrt(mean((y_true - y_pred)^2))`, in the same unit as the labels
    #[default]
    RootMeanSquared,
}

impl Metric for ErrorMetric {
    fn name(&self) -> &str {
        match self {
            ErrorMetric::MeanAbsolute => "mae",
            ErrorMetric::MeanSquared => "mse",
            ErrorMetric::RootMeanSquared => "rmse",
        }
    }

    fn score(&self, y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
        check_lengths(&y_true, &y_pred)?;
        let diff = &y_true - &y_pred;
        let score = match self {
            ErrorMetric::MeanAbsolute => diff.mapv(f64::abs).mean().unwrap_or(0.),
            ErrorMetric::MeanSquared => diff.mapv(|v| v * v).mean().unwrap_or(0.),
            ErrorMetric::RootMeanSquared => diff.mapv(|v| v * v).mean().unwrap_or(0.).sqrt(),
        };
        Ok(score)
    }
}

impl fmt::Display for ErrorMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ErrorMetric {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mae" => Ok(ErrorMetric::MeanAbsolute),
            "mse" => Ok(ErrorMetric::MeanSquared),
            "rmse" => Ok(ErrorMetric::RootMeanSquared),
            _ => Err(EvalError::UnknownMetric(s.to_string())),
        }
    }
}

/// A named metric computed by a user given function.
///
/// ```
/// use homeval_eval::{FnMetric, Metric};
/// use ndarray::array;
///
/// // error relative to the true price
/// let relative = FnMetric::new("relative", |y_true, y_pred| {
///     ((&y_true - &y_pred) / &y_true).mapv(f64::abs).mean().unwrap_or(0.)
/// });
/// let score = relative.score(array![100., 200.].view(), array![110., 180.].view()).unwrap();
/// assert!((score - 0.1).abs() < 1e-12);
/// ```
pub struct FnMetric<F>
where
    F: Fn(ArrayView1<f64>, ArrayView1<f64>) -> f64,
{
    name: String,
    func: F,
}

impl<F> FnMetric<F>
where
    F: Fn(ArrayView1<f64>, ArrayView1<f64>) -> f64,
{
    /// Constructor given the metric name and `func(y_true, y_pred)`
    pub fn new<S: Into<String>>(name: S, func: F) -> Self {
        FnMetric {
            name: name.into(),
            func,
        }
    }
}

impl<F> Metric for FnMetric<F>
where
    F: Fn(ArrayView1<f64>, ArrayView1<f64>) -> f64,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
        check_lengths(&y_true, &y_pred)?;
        Ok((self.func)(y_true, y_pred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    #[test]
    fn test_mae() {
        let y_true = array![100., 300.];
        let y_pred = array![150., 300.];
        let mae = ErrorMetric::MeanAbsolute
            .score(y_true.view(), y_pred.view())
            .unwrap();
        assert_abs_diff_eq!(mae, 25.0);
    }

    #[test]
    fn test_mse_rmse() {
        let y_true = array![1., 2., 3., 4.];
        let y_pred = array![2., 2., 1., 4.];
        let mse = ErrorMetric::MeanSquared
            .score(y_true.view(), y_pred.view())
            .unwrap();
        assert_abs_diff_eq!(mse, 1.25);
        let rmse = ErrorMetric::RootMeanSquared
            .score(y_true.view(), y_pred.view())
            .unwrap();
        assert_abs_diff_eq!(rmse, 1.25f64.sqrt());
    }

    #[test]
    fn test_metric_is_symmetric_for_usual_errors() {
        let a = array![10., 20., 35.];
        let b = array![12., 15., 30.];
        for metric in [
            ErrorMetric::MeanAbsolute,
            ErrorMetric::MeanSquared,
            ErrorMetric::RootMeanSquared,
        ] {
            assert_abs_diff_eq!(
                metric.score(a.view(), b.view()).unwrap(),
                metric.score(b.view(), a.view()).unwrap()
            );
        }
    }

    #[test]
    fn test_length_mismatch() {
        let err = ErrorMetric::MeanAbsolute
            .score(array![1., 2.].view(), array![1.].view())
            .unwrap_err();
        assert!(matches!(err, EvalError::ShapeMismatch { y_true: 2, y_pred: 1 }));

        let custom = FnMetric::new("max", |_, _| 0.);
        assert!(custom
            .score(array![1.].view(), array![1., 2.].view())
            .is_err());
    }

    #[test]
    fn test_empty_scores_zero() {
        let empty = Array1::<f64>::zeros(0);
        for metric in [
            ErrorMetric::MeanAbsolute,
            ErrorMetric::MeanSquared,
            ErrorMetric::RootMeanSquared,
        ] {
            assert_eq!(metric.score(empty.view(), empty.view()).unwrap(), 0.);
        }
    }

    #[test]
    fn test_parse_metric() {
        assert_eq!("MAE".parse::<ErrorMetric>().unwrap(), ErrorMetric::MeanAbsolute);
        assert_eq!("rmse".parse::<ErrorMetric>().unwrap(), ErrorMetric::default());
        assert!(matches!(
            "r2".parse::<ErrorMetric>(),
            Err(EvalError::UnknownMetric(_))
        ));
        assert_eq!(ErrorMetric::MeanSquared.to_string(), "mse");
    }

    #[test]
    fn test_asymmetric_custom_metric() {
        // under estimation costs twice as much as over estimation
        let pinball = FnMetric::new("asym", |y_true, y_pred| {
            let diff = &y_true - &y_pred;
            diff.mapv(|d| if d > 0. { 2. * d } else { -d })
                .mean()
                .unwrap_or(0.)
        });
        let boxed: Box<dyn Metric> = Box::new(pinball);
        assert_eq!(boxed.name(), "asym");
        let score = boxed
            .score(array![100., 100.].view(), array![90., 110.].view())
            .unwrap();
        assert_abs_diff_eq!(score, 15.);
    }
}

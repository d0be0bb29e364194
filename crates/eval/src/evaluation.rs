use crate::errors::Result;
use crate::metrics::Metric;

use homeval_data::{FeatureTable, Split};
use homeval_models::Regressor;
use log::debug;
use ndarray::{Array1, ArrayBase, Data, Ix1};
use std::fmt;

/// Predictions and error scores of one model on the train and test splits
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationResult {
    metric: String,
    train_predictions: Array1<f64>,
    test_predictions: Array1<f64>,
    train_error: f64,
    test_error: f64,
}

impl EvaluationResult {
    /// Name of the metric used for both scores
    pub fn metric(&self) -> &str {
        &self.metric
    }

    /// Predictions on the train features
    pub fn train_predictions(&self) -> &Array1<f64> {
        &self.train_predictions
    }

    /// Predictions on the test features
    pub fn test_predictions(&self) -> &Array1<f64> {
        &self.test_predictions
    }

    /// Error on the train split
    pub fn train_error(&self) -> f64 {
        self.train_error
    }

    /// Error on the test split
    pub fn test_error(&self) -> f64 {
        self.test_error
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "train {metric} = {:.2}, test {metric} = {:.2}",
            self.train_error,
            self.test_error,
            metric = self.metric
        )
    }
}

/// Evaluate a fitted `model` on train and test data with the given `metric`.
///
/// The model is asked for predictions exactly twice, on the train features
/// first and then on the test features, then the metric is applied to each
/// split. Neither the model nor the inputs are modified.
///
/// Any failure, from the model or the metric, aborts the whole evaluation
/// and is returned as is: no partial result is produced.
///
/// # Example
///
/// ```
/// use homeval_data::FeatureTable;
/// use homeval_eval::{evaluate, ErrorMetric};
/// use homeval_models::GroupAverageRegressor;
/// use ndarray::array;
///
/// let train = FeatureTable::new(vec![("Neighborhood", vec!["A", "A", "B"].into())]).unwrap();
/// let labels = array![100., 200., 300.];
/// let mut model = GroupAverageRegressor::new("Neighborhood");
/// model.fit(&train, &labels).unwrap();
///
/// let test = FeatureTable::new(vec![("Neighborhood", vec!["C"].into())]).unwrap();
/// let result = evaluate(&model, &ErrorMetric::MeanAbsolute, &train, &labels, &test, &array![260.])
///     .unwrap();
/// assert_eq!(result.train_error(), 100. / 3.);
/// assert_eq!(result.test_error(), 60.);
/// ```
pub fn evaluate<M, S>(
    model: &M,
    metric: &S,
    train_features: &FeatureTable,
    train_labels: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    test_features: &FeatureTable,
    test_labels: &ArrayBase<impl Data<Elem = f64>, Ix1>,
) -> Result<EvaluationResult>
where
    M: Regressor + ?Sized,
    S: Metric + ?Sized,
{
    let train_predictions = model.predict(train_features)?;
    let test_predictions = model.predict(test_features)?;
    let train_error = metric.score(train_labels.view(), train_predictions.view())?;
    let test_error = metric.score(test_labels.view(), test_predictions.view())?;
    debug!(
        "{} evaluated: train {} = {}, test {} = {}",
        model,
        metric.name(),
        train_error,
        metric.name(),
        test_error
    );
    Ok(EvaluationResult {
        metric: metric.name().to_string(),
        train_predictions,
        test_predictions,
        train_error,
        test_error,
    })
}

/// Same as [`evaluate`] with features and labels taken from [`Split`]s
pub fn evaluate_splits<M, S>(
    model: &M,
    metric: &S,
    train: &Split,
    test: &Split,
) -> Result<EvaluationResult>
where
    M: Regressor + ?Sized,
    S: Metric + ?Sized,
{
    evaluate(
        model,
        metric,
        train.features(),
        train.labels(),
        test.features(),
        test.labels(),
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::metrics::{ErrorMetric, FnMetric};
    use crate::EvalError;
    use approx::assert_abs_diff_eq;
    use homeval_models::{GroupAverageRegressor, ModelError};
    use ndarray::array;
    use std::sync::Mutex;

    /// Returns the row count as prediction and records every call
    pub(crate) struct Recorder {
        pub(crate) calls: Mutex<Vec<usize>>,
        pub(crate) fail_on: Option<usize>,
    }

    impl Recorder {
        pub(crate) fn new(fail_on: Option<usize>) -> Self {
            Recorder {
                calls: Mutex::new(Vec::new()),
                fail_on,
            }
        }
    }

    impl fmt::Display for Recorder {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Recorder")
        }
    }

    impl Regressor for Recorder {
        fn predict(&self, features: &FeatureTable) -> homeval_models::Result<Array1<f64>> {
            let n = features.nrows();
            self.calls.lock().unwrap().push(n);
            if self.fail_on == Some(n) {
                return Err(ModelError::SchemaMismatch {
                    column: "GrLivArea".to_string(),
                });
            }
            Ok(Array1::from_elem(n, n as f64))
        }
    }

    pub(crate) fn neighborhoods(values: Vec<&str>) -> FeatureTable {
        FeatureTable::new(vec![("Neighborhood", values.into())]).unwrap()
    }

    #[test]
    fn test_evaluate_group_average_mae() {
        let mut model = GroupAverageRegressor::new("Neighborhood");
        model
            .fit(&neighborhoods(vec!["A", "A", "B"]), &array![100., 200., 300.])
            .unwrap();

        let result = evaluate(
            &model,
            &ErrorMetric::MeanAbsolute,
            &neighborhoods(vec!["A", "B"]),
            &array![100., 300.],
            &neighborhoods(vec!["A", "B", "C"]),
            &array![150., 250., 100.],
        )
        .unwrap();
        assert_eq!(result.train_predictions(), &array![150., 300.]);
        assert_eq!(result.test_predictions(), &array![150., 300., 200.]);
        assert_abs_diff_eq!(result.train_error(), 25.0);
        assert_abs_diff_eq!(result.test_error(), 50.0);
        assert_eq!(result.metric(), "mae");
        assert_eq!(result.to_string(), "train mae = 25.00, test mae = 50.00");
    }

    #[test]
    fn test_predict_called_twice_train_first() {
        let model = Recorder::new(None);
        let result = evaluate(
            &model,
            &ErrorMetric::RootMeanSquared,
            &neighborhoods(vec!["A", "B", "C"]),
            &array![3., 3., 3.],
            &neighborhoods(vec!["A"]),
            &array![3.],
        )
        .unwrap();
        assert_eq!(*model.calls.lock().unwrap(), vec![3, 1]);
        assert_eq!(result.train_error(), 0.);
        assert_eq!(result.test_error(), 2.);
    }

    #[test]
    fn test_model_failure_aborts_evaluation() {
        let model = Recorder::new(Some(1));
        let err = evaluate(
            &model,
            &ErrorMetric::MeanAbsolute,
            &neighborhoods(vec!["A", "B"]),
            &array![1., 1.],
            &neighborhoods(vec!["A"]),
            &array![1.],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EvalError::ModelError(ModelError::SchemaMismatch { column }) if column == "GrLivArea"
        ));
        assert_eq!(*model.calls.lock().unwrap(), vec![2, 1]);
    }

    #[test]
    fn test_train_failure_skips_test_predict() {
        let model = Recorder::new(Some(2));
        assert!(evaluate(
            &model,
            &ErrorMetric::MeanAbsolute,
            &neighborhoods(vec!["A", "B"]),
            &array![1., 1.],
            &neighborhoods(vec!["A"]),
            &array![1.],
        )
        .is_err());
        assert_eq!(*model.calls.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_unfitted_model_propagates() {
        let model = GroupAverageRegressor::new("Neighborhood");
        let split = Split::new(neighborhoods(vec!["A"]), array![1.]).unwrap();
        let err = evaluate_splits(&model, &ErrorMetric::MeanAbsolute, &split, &split).unwrap_err();
        assert!(matches!(err, EvalError::ModelError(ModelError::Unfitted(_))));
    }

    #[test]
    fn test_label_mismatch_is_an_error() {
        let model = Recorder::new(None);
        let err = evaluate(
            &model,
            &ErrorMetric::MeanAbsolute,
            &neighborhoods(vec!["A", "B"]),
            &array![1.],
            &neighborhoods(vec!["A"]),
            &array![1.],
        )
        .unwrap_err();
        assert!(matches!(err, EvalError::ShapeMismatch { y_true: 1, y_pred: 2 }));
    }

    #[test]
    fn test_injected_metric_and_dyn_model() {
        let mut model = GroupAverageRegressor::new("Neighborhood");
        model
            .fit(&neighborhoods(vec!["A", "B"]), &array![100., 300.])
            .unwrap();
        let model: Box<dyn Regressor> = Box::new(model);
        let max_error = FnMetric::new("max", |y_true, y_pred| {
            (&y_true - &y_pred)
                .iter()
                .fold(0., |acc: f64, v| acc.max(v.abs()))
        });
        let train = Split::new(neighborhoods(vec!["A", "B"]), array![90., 330.]).unwrap();
        let test = Split::new(neighborhoods(vec!["Z"]), array![150.]).unwrap();
        let result = evaluate_splits(&model, &max_error, &train, &test).unwrap();
        assert_eq!(result.metric(), "max");
        assert_abs_diff_eq!(result.train_error(), 30.);
        assert_abs_diff_eq!(result.test_error(), 50.);
    }
}

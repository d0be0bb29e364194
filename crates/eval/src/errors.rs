use homeval_data::DataError;
use homeval_models::ModelError;
use thiserror::Error;

/// A result type for model evaluation
pub type Result<T> = std::result::Result<T, EvalError>;

/// An error when evaluating a model
#[derive(Error, Debug)]
pub enum EvalError {
    /// When the evaluated model fails, the model error is kept unchanged
    #[error(transparent)]
    ModelError(#[from] ModelError),
    /// When the dataset cannot be used
    #[error(transparent)]
    DataError(#[from] DataError),
    /// When true labels and predictions lengths differ
    #[error("Shape mismatch: {y_true} labels for {y_pred} predictions")]
    ShapeMismatch {
        /// Number of true labels
        y_true: usize,
        /// Number of predictions
        y_pred: usize,
    },
    /// When a metric name is not known
    #[error("Unknown metric: {0} (expected mae, mse or rmse)")]
    UnknownMetric(String),
}

use homeval_data::DataError;
use thiserror::Error;

/// A result type for regression models
pub type Result<T> = std::result::Result<T, ModelError>;

/// An error when fitting, applying or persisting a [`Regressor`](crate::Regressor)
#[derive(Error, Debug)]
pub enum ModelError {
    /// When predict is called before the model was fitted
    #[error("Unfitted model: {0} has to be fitted before predict")]
    Unfitted(String),
    /// When a required column is absent from the features table
    #[error("Schema mismatch: column `{column}` not found")]
    SchemaMismatch {
        /// Name of the missing column
        column: String,
    },
    /// When features and labels row counts differ at fit time
    #[error("Shape mismatch: {features} feature rows for {labels} labels")]
    ShapeMismatch {
        /// Number of feature rows
        features: usize,
        /// Number of labels
        labels: usize,
    },
    /// When the features table cannot be used
    #[error(transparent)]
    DataError(DataError),
    /// When error due to a bad value
    #[error("InvalidValue error: {0}")]
    InvalidValueError(String),
    /// When a linfa error occurs
    #[error(transparent)]
    LinfaError(#[from] linfa::error::Error),
    /// When json (de)serialization fails
    #[cfg(feature = "persistent")]
    #[error("Json error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// When error during saving or loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<DataError> for ModelError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::SchemaMismatch { column } => ModelError::SchemaMismatch { column },
            err => ModelError::DataError(err),
        }
    }
}

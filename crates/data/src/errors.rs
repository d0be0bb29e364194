use thiserror::Error;

/// A result type for data handling
pub type Result<T> = std::result::Result<T, DataError>;

/// An error when building, loading or splitting a [`FeatureTable`](crate::FeatureTable)
#[derive(Error, Debug)]
pub enum DataError {
    /// When a required column is absent from the table
    #[error("Schema mismatch: column `{column}` not found")]
    SchemaMismatch {
        /// Name of the missing column
        column: String,
    },
    /// When row counts do not line up
    #[error("Shape mismatch: expected {expected} rows, got {got}")]
    ShapeMismatch {
        /// Expected number of rows
        expected: usize,
        /// Actual number of rows
        got: usize,
    },
    /// When two columns share the same name
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
    /// When the target column cannot be used as regression labels
    #[error("Invalid target: {0}")]
    InvalidTarget(String),
    /// When error due to a bad value
    #[error("InvalidValue error: {0}")]
    InvalidValue(String),
    /// When the CSV reader fails
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// When error during file access
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

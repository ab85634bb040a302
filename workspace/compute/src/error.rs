use std::path::PathBuf;

use thiserror::Error;
use tracing::error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// The ingestion source path does not resolve to a file.
    #[error("source file {} does not exist", .0.display())]
    SourceNotFound(PathBuf),

    /// The ingestion source resolved but contains no rows.
    #[error("source file is empty")]
    EmptySource,

    /// The ingestion source could not be parsed as CSV.
    #[error("parse error: {0}")]
    Parse(String),

    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

// Fold CSV reader failures into the parse arm; the reader surfaces IO
// problems through the same error type once the file is open.
impl From<csv::Error> for ComputeError {
    fn from(error: csv::Error) -> Self {
        let err = match error.kind() {
            csv::ErrorKind::Io(_) => ComputeError::Parse(format!("io error: {error}")),
            csv::ErrorKind::Utf8 { .. } => ComputeError::Parse(format!("invalid utf-8: {error}")),
            _ => ComputeError::Parse(error.to_string()),
        };
        error!(?err, "CSV source error");
        err
    }
}

impl From<sea_orm::TransactionError<sea_orm::DbErr>> for ComputeError {
    fn from(error: sea_orm::TransactionError<sea_orm::DbErr>) -> Self {
        match error {
            sea_orm::TransactionError::Connection(e) => ComputeError::Database(e),
            sea_orm::TransactionError::Transaction(e) => ComputeError::Database(e),
        }
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or querying the SQLite store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("input file '{}' not found; run `storegen generate` first", .path.display())]
    MissingInput { path: PathBuf },
    #[error("database '{}' not found; run `storegen load` first", .path.display())]
    DatabaseNotFound { path: PathBuf },
    #[error("schema mismatch for table '{table}': {message}")]
    SchemaMismatch { table: String, message: String },
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

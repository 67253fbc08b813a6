use thiserror::Error;

/// Core error type shared across storegen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested row counts cannot produce a consistent dataset.
    #[error("invalid counts: {0}")]
    InvalidCounts(String),
}

/// Convenience alias for results returned by storegen crates.
pub type Result<T> = std::result::Result<T, Error>;

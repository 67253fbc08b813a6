use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("exhausted unique value space for '{field}' after {attempts} attempts")]
    UniquenessExhausted { field: String, attempts: u32 },
    #[error("cannot generate {child} without any {parent}")]
    EmptyParent {
        child: &'static str,
        parent: &'static str,
    },
    #[error("core error: {0}")]
    Core(#[from] storegen_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

//! Verification of generated storegen datasets.
//!
//! Reads the CSV files back, checks the cross-table invariants the generator
//! promises, and writes `metrics.json` plus a markdown report.

pub mod engine;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod report;

pub use engine::VerificationEngine;
pub use errors::EvalError;
pub use metrics::{CheckStats, CheckSummary, METRICS_VERSION, TableMetrics, VerificationReport};
pub use model::{VerificationResult, VerifyOptions, Violation};
pub use report::render_report;

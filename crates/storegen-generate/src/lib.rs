//! Seeded synthetic data generation for storegen.
//!
//! Builds the five e-commerce collections with consistent cross references
//! and writes them as CSV files, deterministically for a given seed.

pub mod engine;
pub mod entities;
pub mod errors;
pub mod faker;
pub mod model;
pub mod output;

pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use faker::{FactProvider, FakeFacts, UniqueTracker};
pub use model::{Dataset, GenerateOptions, GenerationReport, TableReport};

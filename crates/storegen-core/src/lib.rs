//! Core contracts for storegen.
//!
//! This crate defines the e-commerce entity types, their CSV row projections,
//! and the helpers shared by the generator, the SQLite store and the verifier.

pub mod counts;
pub mod entities;
pub mod error;
pub mod money;
pub mod records;

pub use counts::DatasetCounts;
pub use entities::{Category, Customer, Order, OrderItem, Product};
pub use error::{Error, Result};
pub use money::round_currency;
pub use records::{EntityKind, ProductRow, TableRecord};

/// Current contract version for generated datasets and reports.
pub const DATASET_VERSION: &str = "0.1";

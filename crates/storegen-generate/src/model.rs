use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use storegen_core::{Category, Customer, DatasetCounts, Order, OrderItem, Product};

use crate::faker::DEFAULT_MAX_UNIQUE_ATTEMPTS;

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory where the CSV files are written.
    pub out_dir: PathBuf,
    /// Seed for both the fact provider and the choice stream.
    pub seed: u64,
    /// Rows per table.
    pub counts: DatasetCounts,
    /// Upper bound for signup and order dates.
    pub today: NaiveDate,
    /// Maximum draws per unique value before giving up.
    pub max_unique_attempts: u32,
}

impl GenerateOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            out_dir: PathBuf::from("data"),
            seed: 42,
            counts: DatasetCounts::default(),
            today,
            max_unique_attempts: DEFAULT_MAX_UNIQUE_ATTEMPTS,
        }
    }
}

/// The five generated collections, in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub categories: Vec<Category>,
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
}

impl Dataset {
    pub fn counts(&self) -> DatasetCounts {
        DatasetCounts {
            categories: self.categories.len(),
            customers: self.customers.len(),
            products: self.products.len(),
            orders: self.orders.len(),
            order_items: self.order_items.len(),
        }
    }
}

/// Summary of a written table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub file: String,
    pub rows: u64,
    pub bytes_written: u64,
}

/// Report for a generation run. Contains no timestamps, so identical inputs
/// produce an identical report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub dataset_version: String,
    pub seed: u64,
    pub today: NaiveDate,
    pub counts: DatasetCounts,
    pub tables: Vec<TableReport>,
    pub bytes_written: u64,
}

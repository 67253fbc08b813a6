use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use storegen_core::{DATASET_VERSION, EntityKind, ProductRow, TableRecord};

use crate::entities::{
    generate_categories, generate_customers, generate_order_items, generate_orders,
    generate_products,
};
use crate::errors::GenerationError;
use crate::faker::{FakeFacts, UniqueTracker};
use crate::model::{Dataset, GenerateOptions, GenerationReport, TableReport};
use crate::output::csv::write_records;

/// File name of the run summary written next to the CSV files.
pub const REPORT_FILE: &str = "generation_report.json";

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub out_dir: PathBuf,
    pub report: GenerationReport,
}

/// Entry point for generating the e-commerce dataset.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Build all five collections in memory.
    pub fn generate(&self) -> Result<Dataset, GenerationError> {
        let options = &self.options;
        options.counts.validate()?;

        let tracker = UniqueTracker::new(options.max_unique_attempts);
        let mut facts = FakeFacts::with_tracker(hash_seed(options.seed, "facts"), tracker);
        let mut rng = ChaCha8Rng::seed_from_u64(hash_seed(options.seed, "choices"));
        let counts = options.counts;

        let categories = generate_categories(&mut facts, counts.categories)?;
        debug!(table = "categories", rows = categories.len(), "generated");
        let customers = generate_customers(&mut facts, options.today, counts.customers)?;
        debug!(table = "customers", rows = customers.len(), "generated");
        let products = generate_products(&mut rng, &mut facts, &categories, counts.products)?;
        debug!(table = "products", rows = products.len(), "generated");
        let mut orders = generate_orders(
            &mut rng,
            &mut facts,
            &customers,
            options.today,
            counts.orders,
        )?;
        debug!(table = "orders", rows = orders.len(), "generated");
        let order_items =
            generate_order_items(&mut rng, &mut orders, &products, counts.order_items)?;
        debug!(table = "order_items", rows = order_items.len(), "generated");

        Ok(Dataset {
            categories,
            customers,
            products,
            orders,
            order_items,
        })
    }

    /// Generate the dataset and write one CSV file per table plus the report.
    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let out_dir = self.options.out_dir.clone();
        std::fs::create_dir_all(&out_dir)?;

        info!(
            out_dir = %out_dir.display(),
            seed = self.options.seed,
            today = %self.options.today,
            "generation started"
        );

        let dataset = self.generate()?;
        let product_rows: Vec<ProductRow> = dataset.products.iter().map(ProductRow::from).collect();

        let tables = vec![
            write_table(&out_dir, &dataset.categories)?,
            write_table(&out_dir, &dataset.customers)?,
            write_table(&out_dir, &product_rows)?,
            write_table(&out_dir, &dataset.orders)?,
            write_table(&out_dir, &dataset.order_items)?,
        ];

        let report = GenerationReport {
            dataset_version: DATASET_VERSION.to_string(),
            seed: self.options.seed,
            today: self.options.today,
            counts: dataset.counts(),
            bytes_written: tables.iter().map(|table| table.bytes_written).sum(),
            tables,
        };
        std::fs::write(
            out_dir.join(REPORT_FILE),
            serde_json::to_vec_pretty(&report)?,
        )?;

        info!(
            tables = report.tables.len(),
            bytes_written = report.bytes_written,
            duration_ms = start.elapsed().as_millis() as u64,
            "generation completed"
        );

        Ok(GenerationResult { out_dir, report })
    }
}

fn write_table<T: TableRecord>(out_dir: &Path, rows: &[T]) -> Result<TableReport, GenerationError> {
    let kind: EntityKind = T::KIND;
    let file = kind.file_name();
    let bytes_written = write_records(&out_dir.join(&file), rows)?;
    info!(
        table = kind.table(),
        rows = rows.len(),
        bytes_written,
        "table written"
    );
    Ok(TableReport {
        table: kind.table().to_string(),
        file,
        rows: rows.len() as u64,
        bytes_written,
    })
}

/// Derive an independent stream seed from the run seed and a stream name.
fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::hash_seed;

    #[test]
    fn stream_seeds_differ_per_key() {
        assert_ne!(hash_seed(42, "facts"), hash_seed(42, "choices"));
        assert_ne!(hash_seed(42, "facts"), hash_seed(43, "facts"));
        assert_eq!(hash_seed(42, "facts"), hash_seed(42, "facts"));
    }
}

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, warn};

use storegen_core::{
    Category, Customer, DatasetCounts, EntityKind, Order, OrderItem, ProductRow, TableRecord,
    round_currency,
};
use storegen_generate::engine::REPORT_FILE;
use storegen_generate::output::csv::read_records;
use storegen_generate::GenerationReport;

use crate::errors::EvalError;
use crate::metrics::{CheckSummary, METRICS_VERSION, TableMetrics, VerificationReport};
use crate::model::{VerificationResult, VerifyOptions, Violation};
use crate::report::render_report;

const TOTAL_TOLERANCE: f64 = 1e-9;

/// Verify a generated dataset directory against the generator's invariants.
#[derive(Debug, Clone)]
pub struct VerificationEngine {
    options: VerifyOptions,
}

impl VerificationEngine {
    pub fn new(options: VerifyOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, data_dir: &Path) -> Result<VerificationResult, EvalError> {
        let generation = read_generation_report(data_dir)?;
        let tables = LoadedTables::read(data_dir)?;

        let mut warnings = Vec::new();
        let today = self
            .options
            .today
            .or_else(|| generation.as_ref().map(|report| report.today));
        if today.is_none() {
            warnings.push(format!(
                "no reference date and no {REPORT_FILE}; order_date upper bound not checked"
            ));
        }

        let mut checker = Checker::default();
        checker.dense_ids(&tables);
        checker.unique(&tables);
        checker.foreign_keys(&tables);
        checker.date_window(&tables, today);
        checker.order_totals(&tables);
        checker.price_snapshot(&tables);
        let Checker { checks, violations } = checker;

        let expected = generation.as_ref().map(|report| report.counts);
        let metrics = VerificationReport {
            metrics_version: METRICS_VERSION.to_string(),
            seed: generation.as_ref().map(|report| report.seed),
            today,
            tables: tables.metrics(expected.as_ref()),
            checks,
            violations: violations.len() as u64,
            warnings,
        };

        let report = render_report(&metrics, &violations, self.options.max_examples);
        let out_dir = self
            .options
            .out_dir
            .clone()
            .unwrap_or_else(|| data_dir.to_path_buf());
        std::fs::create_dir_all(&out_dir)?;

        let metrics_path = out_dir.join("metrics.json");
        std::fs::write(&metrics_path, serde_json::to_vec_pretty(&metrics)?)?;

        let report_path = out_dir.join("report.md");
        std::fs::write(&report_path, report.as_bytes())?;

        if violations.is_empty() {
            info!(data_dir = %data_dir.display(), "dataset verified");
        } else {
            warn!(
                data_dir = %data_dir.display(),
                violations = violations.len(),
                "dataset has violations"
            );
        }

        if self.options.strict && !violations.is_empty() {
            return Err(EvalError::Violations(violations.len() as u64));
        }

        Ok(VerificationResult {
            out_dir,
            metrics_path,
            report_path,
            metrics,
            report,
            violations,
        })
    }
}

fn read_generation_report(data_dir: &Path) -> Result<Option<GenerationReport>, EvalError> {
    let path = data_dir.join(REPORT_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let bytes = std::fs::read(&path)?;
    Ok(Some(serde_json::from_slice(&bytes)?))
}

struct LoadedTables {
    categories: Vec<Category>,
    customers: Vec<Customer>,
    products: Vec<ProductRow>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
}

impl LoadedTables {
    fn read(data_dir: &Path) -> Result<Self, EvalError> {
        Ok(Self {
            categories: read_table(data_dir)?,
            customers: read_table(data_dir)?,
            products: read_table(data_dir)?,
            orders: read_table(data_dir)?,
            order_items: read_table(data_dir)?,
        })
    }

    fn rows(&self, kind: EntityKind) -> u64 {
        let rows = match kind {
            EntityKind::Category => self.categories.len(),
            EntityKind::Customer => self.customers.len(),
            EntityKind::Product => self.products.len(),
            EntityKind::Order => self.orders.len(),
            EntityKind::OrderItem => self.order_items.len(),
        };
        rows as u64
    }

    fn metrics(&self, expected: Option<&DatasetCounts>) -> Vec<TableMetrics> {
        EntityKind::ALL
            .iter()
            .map(|kind| TableMetrics {
                table: kind.table().to_string(),
                rows_found: self.rows(*kind),
                rows_expected: expected.map(|counts| expected_rows(counts, *kind)),
            })
            .collect()
    }
}

fn read_table<T: TableRecord>(data_dir: &Path) -> Result<Vec<T>, EvalError> {
    let path = data_dir.join(T::KIND.file_name());
    if !path.is_file() {
        return Err(EvalError::InvalidDataset(format!(
            "missing file '{}'",
            path.display()
        )));
    }
    Ok(read_records(&path)?)
}

fn expected_rows(counts: &DatasetCounts, kind: EntityKind) -> u64 {
    let rows = match kind {
        EntityKind::Category => counts.categories,
        EntityKind::Customer => counts.customers,
        EntityKind::Product => counts.products,
        EntityKind::Order => counts.orders,
        EntityKind::OrderItem => counts.order_items,
    };
    rows as u64
}

#[derive(Default)]
struct Checker {
    checks: CheckSummary,
    violations: Vec<Violation>,
}

impl Checker {
    fn push(&mut self, code: &str, path: &str, message: String, row: usize, example: String) {
        self.violations.push(Violation {
            code: code.to_string(),
            path: path.to_string(),
            message,
            row_index: Some(row as u64),
            example: Some(example),
        });
    }

    fn dense_ids(&mut self, tables: &LoadedTables) {
        let ids: [(EntityKind, Vec<u32>); 5] = [
            (
                EntityKind::Category,
                tables.categories.iter().map(|row| row.id).collect(),
            ),
            (
                EntityKind::Customer,
                tables.customers.iter().map(|row| row.id).collect(),
            ),
            (
                EntityKind::Product,
                tables.products.iter().map(|row| row.id).collect(),
            ),
            (
                EntityKind::Order,
                tables.orders.iter().map(|row| row.id).collect(),
            ),
            (
                EntityKind::OrderItem,
                tables.order_items.iter().map(|row| row.id).collect(),
            ),
        ];
        for (kind, ids) in ids {
            let path = format!("{}.id", kind.table());
            for (idx, id) in ids.into_iter().enumerate() {
                let expected = idx as u64 + 1;
                if !self.checks.dense_ids.record(u64::from(id) == expected) {
                    self.push(
                        "non_dense_id",
                        &path,
                        format!("expected id {expected}"),
                        idx,
                        id.to_string(),
                    );
                }
            }
        }
    }

    fn unique(&mut self, tables: &LoadedTables) {
        let mut names = HashSet::new();
        for (idx, category) in tables.categories.iter().enumerate() {
            if !self.checks.unique.record(names.insert(category.name.as_str())) {
                self.push(
                    "duplicate_value",
                    "categories.name",
                    "category name repeated".to_string(),
                    idx,
                    category.name.clone(),
                );
            }
        }

        let mut emails = HashSet::new();
        for (idx, customer) in tables.customers.iter().enumerate() {
            if !self.checks.unique.record(emails.insert(customer.email.as_str())) {
                self.push(
                    "duplicate_value",
                    "customers.email",
                    "customer email repeated".to_string(),
                    idx,
                    customer.email.clone(),
                );
            }
        }
    }

    fn foreign_keys(&mut self, tables: &LoadedTables) {
        let category_names: HashSet<&str> = tables
            .categories
            .iter()
            .map(|category| category.name.as_str())
            .collect();
        for (idx, product) in tables.products.iter().enumerate() {
            let ok = category_names.contains(product.category.as_str());
            if !self.checks.foreign_keys.record(ok) {
                self.push(
                    "dangling_reference",
                    "products.category",
                    "category not found".to_string(),
                    idx,
                    product.category.clone(),
                );
            }
        }

        let customer_ids: HashSet<u32> = tables.customers.iter().map(|row| row.id).collect();
        for (idx, order) in tables.orders.iter().enumerate() {
            if !self
                .checks
                .foreign_keys
                .record(customer_ids.contains(&order.customer_id))
            {
                self.push(
                    "dangling_reference",
                    "orders.customer_id",
                    "customer not found".to_string(),
                    idx,
                    order.customer_id.to_string(),
                );
            }
        }

        let order_ids: HashSet<u32> = tables.orders.iter().map(|row| row.id).collect();
        let product_ids: HashSet<u32> = tables.products.iter().map(|row| row.id).collect();
        for (idx, item) in tables.order_items.iter().enumerate() {
            if !self.checks.foreign_keys.record(order_ids.contains(&item.order_id)) {
                self.push(
                    "dangling_reference",
                    "order_items.order_id",
                    "order not found".to_string(),
                    idx,
                    item.order_id.to_string(),
                );
            }
            if !self
                .checks
                .foreign_keys
                .record(product_ids.contains(&item.product_id))
            {
                self.push(
                    "dangling_reference",
                    "order_items.product_id",
                    "product not found".to_string(),
                    idx,
                    item.product_id.to_string(),
                );
            }
        }
    }

    fn date_window(&mut self, tables: &LoadedTables, today: Option<NaiveDate>) {
        if let Some(today) = today {
            for (idx, customer) in tables.customers.iter().enumerate() {
                if !self.checks.date_window.record(customer.signup_date <= today) {
                    self.push(
                        "date_out_of_window",
                        "customers.signup_date",
                        format!("signup after {today}"),
                        idx,
                        customer.signup_date.to_string(),
                    );
                }
            }
        }

        let signups: HashMap<u32, NaiveDate> = tables
            .customers
            .iter()
            .map(|customer| (customer.id, customer.signup_date))
            .collect();
        for (idx, order) in tables.orders.iter().enumerate() {
            // Dangling customers are reported by the foreign key check.
            let Some(signup) = signups.get(&order.customer_id) else {
                continue;
            };
            let after_signup = order.order_date >= *signup;
            let before_today = today.is_none_or(|today| order.order_date <= today);
            if !self.checks.date_window.record(after_signup && before_today) {
                self.push(
                    "date_out_of_window",
                    "orders.order_date",
                    format!("outside [{signup}, {}]", display_date(today)),
                    idx,
                    order.order_date.to_string(),
                );
            }
        }
    }

    fn order_totals(&mut self, tables: &LoadedTables) {
        // Mirror the generator: round each line, then round the sum.
        let mut sums: HashMap<u32, f64> = HashMap::new();
        for item in &tables.order_items {
            *sums.entry(item.order_id).or_insert(0.0) += item.line_total();
        }
        for (idx, order) in tables.orders.iter().enumerate() {
            let expected = round_currency(sums.get(&order.id).copied().unwrap_or(0.0));
            let ok = (order.total_amount - expected).abs() <= TOTAL_TOLERANCE;
            if !self.checks.order_totals.record(ok) {
                self.push(
                    "order_total_mismatch",
                    "orders.total_amount",
                    format!("expected {expected}"),
                    idx,
                    order.total_amount.to_string(),
                );
            }
        }
    }

    fn price_snapshot(&mut self, tables: &LoadedTables) {
        let prices: HashMap<u32, f64> = tables
            .products
            .iter()
            .map(|product| (product.id, product.price))
            .collect();
        for (idx, item) in tables.order_items.iter().enumerate() {
            let Some(price) = prices.get(&item.product_id) else {
                continue;
            };
            let ok = (item.price - price).abs() <= TOTAL_TOLERANCE;
            if !self.checks.price_snapshot.record(ok) {
                self.push(
                    "price_mismatch",
                    "order_items.price",
                    format!("product {} costs {price}", item.product_id),
                    idx,
                    item.price.to_string(),
                );
            }
        }
    }
}

fn display_date(date: Option<NaiveDate>) -> String {
    date.map(|date| date.to_string())
        .unwrap_or_else(|| "-".to_string())
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metrics contract version for dataset verification.
pub const METRICS_VERSION: &str = "0.1";

/// Machine-readable outcome of a verification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub metrics_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<NaiveDate>,
    pub tables: Vec<TableMetrics>,
    pub checks: CheckSummary,
    pub violations: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Per-table row counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetrics {
    pub table: String,
    pub rows_found: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_expected: Option<u64>,
}

/// Counters for every invariant family.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckSummary {
    pub dense_ids: CheckStats,
    pub unique: CheckStats,
    pub foreign_keys: CheckStats,
    pub date_window: CheckStats,
    pub order_totals: CheckStats,
    pub price_snapshot: CheckStats,
}

impl CheckSummary {
    pub fn rows(&self) -> [(&'static str, &CheckStats); 6] {
        [
            ("dense_ids", &self.dense_ids),
            ("unique", &self.unique),
            ("foreign_keys", &self.foreign_keys),
            ("date_window", &self.date_window),
            ("order_totals", &self.order_totals),
            ("price_snapshot", &self.price_snapshot),
        ]
    }
}

/// Generic check counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStats {
    pub checked: u64,
    pub violations: u64,
}

impl CheckStats {
    pub(crate) fn record(&mut self, ok: bool) -> bool {
        self.checked += 1;
        if !ok {
            self.violations += 1;
        }
        ok
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of rows to generate per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetCounts {
    pub categories: usize,
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    pub order_items: usize,
}

impl Default for DatasetCounts {
    fn default() -> Self {
        Self {
            categories: 10,
            customers: 50,
            products: 30,
            orders: 100,
            order_items: 200,
        }
    }
}

impl DatasetCounts {
    /// Reject counts where a child table needs rows from an empty parent, or
    /// where a table has more rows than `u32` ids can number.
    pub fn validate(&self) -> Result<()> {
        let tables = [
            ("categories", self.categories),
            ("customers", self.customers),
            ("products", self.products),
            ("orders", self.orders),
            ("order_items", self.order_items),
        ];
        for (table, count) in tables {
            if u32::try_from(count).is_err() {
                return Err(Error::InvalidCounts(format!(
                    "{table} = {count} exceeds the id range (max {})",
                    u32::MAX
                )));
            }
        }
        let parents = [
            ("products", self.products, "categories", self.categories),
            ("orders", self.orders, "customers", self.customers),
            ("order_items", self.order_items, "orders", self.orders),
            ("order_items", self.order_items, "products", self.products),
        ];
        for (child, child_count, parent, parent_count) in parents {
            if child_count > 0 && parent_count == 0 {
                return Err(Error::InvalidCounts(format!(
                    "{child} = {child_count} requires at least one row in {parent}"
                )));
            }
        }
        Ok(())
    }
}

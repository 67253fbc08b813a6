use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::entities::{Category, Customer, Order, OrderItem, Product};

/// The five tables of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Category,
    Customer,
    Product,
    Order,
    OrderItem,
}

impl EntityKind {
    /// All kinds in generation order (parents before children).
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Category,
        EntityKind::Customer,
        EntityKind::Product,
        EntityKind::Order,
        EntityKind::OrderItem,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Customer => "customers",
            Self::Product => "products",
            Self::Order => "orders",
            Self::OrderItem => "order_items",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.csv", self.table())
    }

    /// Column list of the CSV file and the SQL table, in order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Category => Category::COLUMNS,
            Self::Customer => Customer::COLUMNS,
            Self::Product => ProductRow::COLUMNS,
            Self::Order => Order::COLUMNS,
            Self::OrderItem => OrderItem::COLUMNS,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// A fixed-column record that maps one-to-one onto a CSV line.
///
/// Serde field order must match `COLUMNS`.
pub trait TableRecord: Serialize + DeserializeOwned {
    const KIND: EntityKind;
    const COLUMNS: &'static [&'static str];
}

impl TableRecord for Category {
    const KIND: EntityKind = EntityKind::Category;
    const COLUMNS: &'static [&'static str] = &["id", "name", "description"];
}

impl TableRecord for Customer {
    const KIND: EntityKind = EntityKind::Customer;
    const COLUMNS: &'static [&'static str] = &["id", "name", "email", "city", "signup_date"];
}

impl TableRecord for Order {
    const KIND: EntityKind = EntityKind::Order;
    const COLUMNS: &'static [&'static str] = &["id", "customer_id", "order_date", "total_amount"];
}

impl TableRecord for OrderItem {
    const KIND: EntityKind = EntityKind::OrderItem;
    const COLUMNS: &'static [&'static str] = &["id", "order_id", "product_id", "quantity", "price"];
}

/// Projection of [`Product`] written to `products.csv`.
///
/// The category is carried by name; the category id stays in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
}

impl TableRecord for ProductRow {
    const KIND: EntityKind = EntityKind::Product;
    const COLUMNS: &'static [&'static str] = &["id", "name", "category", "price", "stock"];
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            stock: product.stock,
        }
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Product category. Names are unique within a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub description: String,
}

/// Customer account. Emails are unique within a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub city: String,
    pub signup_date: NaiveDate,
}

/// Catalog product referencing a category.
///
/// Both the category id and its name are kept; only the name is written to
/// `products.csv` (see [`crate::ProductRow`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category_id: u32,
    pub category: String,
    pub price: f64,
    pub stock: u32,
}

/// Customer order. `total_amount` is derived from the order items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u32,
    pub customer_id: u32,
    pub order_date: NaiveDate,
    pub total_amount: f64,
}

/// Line item of an order. `price` is a snapshot of the product price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: u32,
    pub order_id: u32,
    pub product_id: u32,
    pub quantity: u32,
    pub price: f64,
}

impl OrderItem {
    /// Line amount as accumulated into the parent order total.
    pub fn line_total(&self) -> f64 {
        crate::round_currency(self.price * f64::from(self.quantity))
    }
}

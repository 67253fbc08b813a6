//! Entity generators.
//!
//! Cross references are drawn uniformly with replacement, so some parents may
//! end up without children (an order without items keeps a zero total).

use chrono::NaiveDate;
use rand::{Rng, RngCore};

use storegen_core::{Category, Customer, Order, OrderItem, Product, round_currency};
use storegen_core::Error as CoreError;

use crate::errors::GenerationError;
use crate::faker::FactProvider;

/// Customers sign up at most this many days before the run date.
pub const SIGNUP_WINDOW_DAYS: i64 = 730;
const DESCRIPTION_WORDS: usize = 6;
const PRICE_MIN: f64 = 5.0;
const PRICE_MAX: f64 = 500.0;
const STOCK_MIN: u32 = 10;
const STOCK_MAX: u32 = 500;
const QUANTITY_MIN: u32 = 1;
const QUANTITY_MAX: u32 = 5;

pub fn generate_categories<F: FactProvider>(
    facts: &mut F,
    count: usize,
) -> Result<Vec<Category>, GenerationError> {
    ensure_id_range("categories", count)?;
    let mut categories = Vec::with_capacity(count);
    for idx in 0..count {
        let name = facts.unique_value("categories.name", |facts| title_case(&facts.word()))?;
        categories.push(Category {
            id: sequential_id(idx),
            name,
            description: facts.sentence(DESCRIPTION_WORDS),
        });
    }
    Ok(categories)
}

pub fn generate_customers<F: FactProvider>(
    facts: &mut F,
    today: NaiveDate,
    count: usize,
) -> Result<Vec<Customer>, GenerationError> {
    let window_start = today - chrono::Duration::days(SIGNUP_WINDOW_DAYS);
    ensure_id_range("customers", count)?;
    let mut customers = Vec::with_capacity(count);
    for idx in 0..count {
        let name = facts.person_name();
        let email = facts.unique_value("customers.email", |facts| facts.email())?;
        let city = facts.city();
        let signup_date = facts.date_between(window_start, today);
        customers.push(Customer {
            id: sequential_id(idx),
            name,
            email,
            city,
            signup_date,
        });
    }
    Ok(customers)
}

pub fn generate_products<F: FactProvider>(
    rng: &mut dyn RngCore,
    facts: &mut F,
    categories: &[Category],
    count: usize,
) -> Result<Vec<Product>, GenerationError> {
    ensure_id_range("products", count)?;
    ensure_parent("products", count, "categories", categories.len())?;
    let mut products = Vec::with_capacity(count);
    for idx in 0..count {
        let category = &categories[rng.random_range(0..categories.len())];
        let name = facts.catch_phrase();
        let price = round_currency(rng.random_range(PRICE_MIN..=PRICE_MAX));
        let stock = rng.random_range(STOCK_MIN..=STOCK_MAX);
        products.push(Product {
            id: sequential_id(idx),
            name,
            category_id: category.id,
            category: category.name.clone(),
            price,
            stock,
        });
    }
    Ok(products)
}

/// Orders start with a zero total; see [`generate_order_items`].
pub fn generate_orders<F: FactProvider>(
    rng: &mut dyn RngCore,
    facts: &mut F,
    customers: &[Customer],
    today: NaiveDate,
    count: usize,
) -> Result<Vec<Order>, GenerationError> {
    ensure_id_range("orders", count)?;
    ensure_parent("orders", count, "customers", customers.len())?;
    let mut orders = Vec::with_capacity(count);
    for idx in 0..count {
        let customer = &customers[rng.random_range(0..customers.len())];
        let order_date = facts.date_between(customer.signup_date, today);
        orders.push(Order {
            id: sequential_id(idx),
            customer_id: customer.id,
            order_date,
            total_amount: 0.0,
        });
    }
    Ok(orders)
}

/// Generate order items and accumulate each parent order's total.
///
/// Every line amount is rounded to cents before it is added, and every total
/// is rounded once more after the last item. This two-stage rounding can differ
/// by a cent from rounding the exact sum; it is kept so fixtures stay stable.
pub fn generate_order_items(
    rng: &mut dyn RngCore,
    orders: &mut [Order],
    products: &[Product],
    count: usize,
) -> Result<Vec<OrderItem>, GenerationError> {
    ensure_id_range("order_items", count)?;
    ensure_parent("order_items", count, "orders", orders.len())?;
    ensure_parent("order_items", count, "products", products.len())?;
    let mut items = Vec::with_capacity(count);
    for idx in 0..count {
        let order_idx = rng.random_range(0..orders.len());
        let product = &products[rng.random_range(0..products.len())];
        let quantity = rng.random_range(QUANTITY_MIN..=QUANTITY_MAX);
        let item = OrderItem {
            id: sequential_id(idx),
            order_id: orders[order_idx].id,
            product_id: product.id,
            quantity,
            price: product.price,
        };
        orders[order_idx].total_amount += item.line_total();
        items.push(item);
    }
    for order in orders.iter_mut() {
        order.total_amount = round_currency(order.total_amount);
    }
    Ok(items)
}

fn ensure_parent(
    child: &'static str,
    child_count: usize,
    parent: &'static str,
    parent_count: usize,
) -> Result<(), GenerationError> {
    if child_count > 0 && parent_count == 0 {
        return Err(GenerationError::EmptyParent { child, parent });
    }
    Ok(())
}

fn ensure_id_range(table: &'static str, count: usize) -> Result<(), GenerationError> {
    if u32::try_from(count).is_err() {
        return Err(CoreError::InvalidCounts(format!(
            "{table} = {count} exceeds the id range (max {})",
            u32::MAX
        ))
        .into());
    }
    Ok(())
}

/// Ids are 1-based; `ensure_id_range` bounds every count to `u32`.
fn sequential_id(idx: usize) -> u32 {
    idx as u32 + 1
}

/// Uppercase the first letter of each whitespace-separated word.
fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

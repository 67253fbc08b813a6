use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use chrono::NaiveDate;

use storegen_core::{Category, Customer, Order, OrderItem, ProductRow, round_currency};
use storegen_generate::output::csv::read_records;
use storegen_generate::{Dataset, GenerateOptions, GenerationEngine};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 31).expect("valid date")
}

fn generate(seed: u64) -> Dataset {
    let mut options = GenerateOptions::new(today());
    options.seed = seed;
    GenerationEngine::new(options)
        .generate()
        .expect("generate dataset")
}

fn assert_dense<I: IntoIterator<Item = u32>>(ids: I, count: usize) {
    let ids: Vec<u32> = ids.into_iter().collect();
    let expected: Vec<u32> = (1..=count as u32).collect();
    assert_eq!(ids, expected);
}

#[test]
fn ids_are_dense_in_every_table() {
    let dataset = generate(42);
    assert_dense(dataset.categories.iter().map(|row| row.id), 10);
    assert_dense(dataset.customers.iter().map(|row| row.id), 50);
    assert_dense(dataset.products.iter().map(|row| row.id), 30);
    assert_dense(dataset.orders.iter().map(|row| row.id), 100);
    assert_dense(dataset.order_items.iter().map(|row| row.id), 200);
}

#[test]
fn unique_fields_hold_across_seeds() {
    for seed in [0_u64, 7, 42, 1_000_003] {
        let dataset = generate(seed);
        let names: HashSet<&str> = dataset.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), dataset.categories.len(), "seed {seed}");
        let emails: HashSet<&str> = dataset.customers.iter().map(|c| c.email.as_str()).collect();
        assert_eq!(emails.len(), dataset.customers.len(), "seed {seed}");
    }
}

#[test]
fn order_dates_and_totals_are_consistent() {
    let dataset = generate(42);
    let customers: HashMap<u32, &Customer> =
        dataset.customers.iter().map(|c| (c.id, c)).collect();

    let mut sums: HashMap<u32, f64> = HashMap::new();
    for item in &dataset.order_items {
        *sums.entry(item.order_id).or_insert(0.0) += item.line_total();
    }

    for order in &dataset.orders {
        let customer = customers
            .get(&order.customer_id)
            .expect("order references a customer");
        assert!(customer.signup_date <= order.order_date);
        assert!(order.order_date <= today());

        let expected = round_currency(sums.get(&order.id).copied().unwrap_or(0.0));
        assert!(
            (order.total_amount - expected).abs() < 1e-9,
            "order {}: {} vs {}",
            order.id,
            order.total_amount,
            expected
        );
    }
}

#[test]
fn item_prices_snapshot_product_prices() {
    let dataset = generate(99);
    let prices: HashMap<u32, f64> = dataset.products.iter().map(|p| (p.id, p.price)).collect();
    for item in &dataset.order_items {
        assert_eq!(prices.get(&item.product_id).copied(), Some(item.price));
    }
}

#[test]
fn written_files_read_back_to_the_same_values() {
    let out_dir: PathBuf =
        std::env::temp_dir().join(format!("storegen_roundtrip_{}", uuid::Uuid::new_v4()));
    let mut options = GenerateOptions::new(today());
    options.out_dir = out_dir.clone();
    let engine = GenerationEngine::new(options);
    let dataset = engine.generate().expect("generate dataset");
    engine.run().expect("write dataset");

    let categories: Vec<Category> =
        read_records(&out_dir.join("categories.csv")).expect("read categories");
    let customers: Vec<Customer> =
        read_records(&out_dir.join("customers.csv")).expect("read customers");
    let products: Vec<ProductRow> =
        read_records(&out_dir.join("products.csv")).expect("read products");
    let orders: Vec<Order> = read_records(&out_dir.join("orders.csv")).expect("read orders");
    let items: Vec<OrderItem> =
        read_records(&out_dir.join("order_items.csv")).expect("read order items");

    assert_eq!(categories, dataset.categories);
    assert_eq!(customers, dataset.customers);
    let expected_products: Vec<ProductRow> =
        dataset.products.iter().map(ProductRow::from).collect();
    assert_eq!(products, expected_products);
    assert_eq!(orders, dataset.orders);
    assert_eq!(items, dataset.order_items);
}

//! SQLite persistence for storegen datasets.
//!
//! Loads the generated CSV files into a fresh database and runs the fixed
//! order report against it.

pub mod db;
pub mod errors;
pub mod load;
pub mod report;
pub mod schema;

pub use db::{create_database, open_existing};
pub use errors::StoreError;
pub use load::{LoadReport, TableLoad, load_dataset};
pub use report::{NO_RECORDS, OrderLine, fetch_order_lines, render_order_report};
pub use schema::{DEFAULT_DATABASE_FILE, LOAD_ORDER, create_table_sql};

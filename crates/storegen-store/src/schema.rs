use storegen_core::EntityKind;

pub const DEFAULT_DATABASE_FILE: &str = "ecommerce.db";

/// Order in which tables are created and filled.
pub const LOAD_ORDER: [EntityKind; 5] = [
    EntityKind::Customer,
    EntityKind::Product,
    EntityKind::Order,
    EntityKind::OrderItem,
    EntityKind::Category,
];

/// DDL for one table. Foreign keys are declared for documentation only; the
/// loader connects with enforcement off.
pub fn create_table_sql(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Customer => {
            r#"
            CREATE TABLE IF NOT EXISTS customers (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                city TEXT NOT NULL,
                signup_date TEXT NOT NULL
            )
            "#
        }
        EntityKind::Product => {
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                price REAL NOT NULL,
                stock INTEGER NOT NULL
            )
            "#
        }
        EntityKind::Order => {
            r#"
            CREATE TABLE IF NOT EXISTS orders (
                id INTEGER PRIMARY KEY,
                customer_id INTEGER NOT NULL,
                order_date TEXT NOT NULL,
                total_amount REAL NOT NULL,
                FOREIGN KEY (customer_id) REFERENCES customers (id)
            )
            "#
        }
        EntityKind::OrderItem => {
            r#"
            CREATE TABLE IF NOT EXISTS order_items (
                id INTEGER PRIMARY KEY,
                order_id INTEGER NOT NULL,
                product_id INTEGER NOT NULL,
                quantity INTEGER NOT NULL,
                price REAL NOT NULL,
                FOREIGN KEY (order_id) REFERENCES orders (id),
                FOREIGN KEY (product_id) REFERENCES products (id)
            )
            "#
        }
        EntityKind::Category => {
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL
            )
            "#
        }
    }
}

/// Parameterized insert for the given column subset.
pub(crate) fn insert_sql(kind: EntityKind, columns: &[String]) -> String {
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        kind.table(),
        columns.join(", "),
        placeholders
    )
}

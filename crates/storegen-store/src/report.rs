use std::io::Write;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::errors::StoreError;

pub const NO_RECORDS: &str = "No records found.";

const ORDER_REPORT_QUERY: &str = r#"
SELECT
    c.name AS customer_name,
    o.order_date AS order_date,
    p.name AS product_name,
    oi.quantity AS quantity,
    ROUND(oi.quantity * oi.price, 2) AS total_spent
FROM orders o
JOIN customers c ON o.customer_id = c.id
JOIN order_items oi ON oi.order_id = o.id
JOIN products p ON oi.product_id = p.id
ORDER BY o.order_date DESC, c.name ASC
"#;

/// One row of the order report: a purchased line with its customer.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct OrderLine {
    pub customer_name: String,
    pub order_date: String,
    pub product_name: String,
    pub quantity: i64,
    pub total_spent: f64,
}

pub async fn fetch_order_lines(pool: &SqlitePool) -> Result<Vec<OrderLine>, StoreError> {
    let lines = sqlx::query_as::<_, OrderLine>(ORDER_REPORT_QUERY)
        .fetch_all(pool)
        .await?;
    Ok(lines)
}

/// Render the fixed-width order report.
///
/// An empty slice prints only [`NO_RECORDS`], without header or divider.
pub fn render_order_report<W: Write>(lines: &[OrderLine], out: &mut W) -> std::io::Result<()> {
    if lines.is_empty() {
        writeln!(out, "{NO_RECORDS}")?;
        return Ok(());
    }

    let header = format!(
        "{:<25} {:<12} {:<35} {:<5} {:>12}",
        "Customer", "Order Date", "Product", "Qty", "Total Spent"
    );
    writeln!(out, "{header}")?;
    writeln!(out, "{}", "-".repeat(header.chars().count()))?;
    for line in lines {
        writeln!(
            out,
            "{:<25} {:<12} {:<35} {:<5} ${:>10.2}",
            line.customer_name, line.order_date, line.product_name, line.quantity, line.total_spent
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(lines: &[OrderLine]) -> String {
        let mut buf = Vec::new();
        render_order_report(lines, &mut buf).expect("render");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn empty_report_is_a_single_line() {
        assert_eq!(render(&[]), "No records found.\n");
    }

    #[test]
    fn rows_are_fixed_width() {
        let lines = vec![OrderLine {
            customer_name: "Ada Lovelace".to_string(),
            order_date: "2025-03-09".to_string(),
            product_name: "Lamp".to_string(),
            quantity: 3,
            total_spent: 59.7,
        }];
        let output = render(&lines);
        let rows: Vec<&str> = output.lines().collect();
        assert_eq!(rows.len(), 3);

        let header = rows[0];
        assert!(header.starts_with("Customer                  Order Date   Product"));
        assert!(header.ends_with(" Total Spent"));
        assert_eq!(header.len(), 25 + 1 + 12 + 1 + 35 + 1 + 5 + 1 + 12);
        assert_eq!(rows[1], "-".repeat(header.len()));

        let expected = format!(
            "{:<25} {:<12} {:<35} {:<5} ${:>10}",
            "Ada Lovelace", "2025-03-09", "Lamp", "3", "59.70"
        );
        assert_eq!(rows[2], expected);
        assert!(rows[2].ends_with("$     59.70"));
    }

    #[test]
    fn long_values_are_not_truncated() {
        let lines = vec![OrderLine {
            customer_name: "A".repeat(30),
            order_date: "2025-01-01".to_string(),
            product_name: "Chair".to_string(),
            quantity: 1,
            total_spent: 1234567.891,
        }];
        let output = render(&lines);
        assert!(output.contains(&"A".repeat(30)));
        assert!(output.contains("$1234567.89"));
    }
}

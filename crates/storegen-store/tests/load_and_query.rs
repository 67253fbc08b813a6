use std::path::PathBuf;

use chrono::NaiveDate;

use storegen_core::EntityKind;
use storegen_generate::{GenerateOptions, GenerationEngine};
use storegen_store::{
    LOAD_ORDER, NO_RECORDS, StoreError, create_database, create_table_sql, fetch_order_lines,
    load_dataset, open_existing, render_order_report,
};

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("storegen_store_{label}_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn generate_into(dir: &PathBuf) {
    let today = NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date");
    let mut options = GenerateOptions::new(today);
    options.out_dir = dir.clone();
    GenerationEngine::new(options)
        .run()
        .expect("generate dataset");
}

#[tokio::test]
async fn load_then_query_returns_every_order_item() {
    let dir = temp_dir("full");
    generate_into(&dir);
    let db_path = dir.join("ecommerce.db");

    let report = load_dataset(&db_path, &dir).await.expect("load dataset");
    let tables: Vec<&str> = report.tables.iter().map(|t| t.table.as_str()).collect();
    assert_eq!(
        tables,
        vec!["customers", "products", "orders", "order_items", "categories"]
    );
    assert_eq!(report.rows_for("categories"), Some(10));
    assert_eq!(report.rows_for("customers"), Some(50));
    assert_eq!(report.rows_for("products"), Some(30));
    assert_eq!(report.rows_for("orders"), Some(100));
    assert_eq!(report.rows_for("order_items"), Some(200));

    let pool = open_existing(&db_path).await.expect("open db");
    let lines = fetch_order_lines(&pool).await.expect("query");
    pool.close().await;

    assert_eq!(lines.len(), 200);
    for pair in lines.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.order_date >= b.order_date);
        if a.order_date == b.order_date {
            assert!(a.customer_name <= b.customer_name);
        }
    }
    for line in &lines {
        assert!((1..=5).contains(&line.quantity));
        assert!(line.total_spent > 0.0);
    }

    let mut out = Vec::new();
    render_order_report(&lines, &mut out).expect("render");
    let text = String::from_utf8(out).expect("utf8");
    assert_eq!(text.lines().count(), 202);
    assert!(text.starts_with("Customer "));
}

#[tokio::test]
async fn reloading_replaces_the_previous_database() {
    let dir = temp_dir("reload");
    generate_into(&dir);
    let db_path = dir.join("ecommerce.db");

    load_dataset(&db_path, &dir).await.expect("first load");
    let report = load_dataset(&db_path, &dir).await.expect("second load");
    assert_eq!(report.rows_for("order_items"), Some(200));

    let pool = open_existing(&db_path).await.expect("open db");
    let lines = fetch_order_lines(&pool).await.expect("query");
    pool.close().await;
    assert_eq!(lines.len(), 200);
}

#[tokio::test]
async fn empty_database_reports_no_records() {
    let dir = temp_dir("empty");
    let db_path = dir.join("empty.db");

    let pool = create_database(&db_path).await.expect("create db");
    for kind in LOAD_ORDER {
        sqlx::query(create_table_sql(kind))
            .execute(&pool)
            .await
            .expect("create table");
    }
    let lines = fetch_order_lines(&pool).await.expect("query");
    pool.close().await;

    let mut out = Vec::new();
    render_order_report(&lines, &mut out).expect("render");
    assert_eq!(String::from_utf8(out).expect("utf8"), format!("{NO_RECORDS}\n"));
}

#[tokio::test]
async fn missing_input_file_is_named_and_database_untouched() {
    let dir = temp_dir("missing_input");
    generate_into(&dir);
    std::fs::remove_file(dir.join(EntityKind::OrderItem.file_name())).expect("remove file");
    let db_path = dir.join("ecommerce.db");

    let err = load_dataset(&db_path, &dir)
        .await
        .expect_err("load must fail");
    match &err {
        StoreError::MissingInput { path } => {
            assert!(path.ends_with("order_items.csv"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("order_items.csv"));
    assert!(!db_path.exists());
}

#[tokio::test]
async fn missing_database_is_named() {
    let dir = temp_dir("missing_db");
    let db_path = dir.join("nowhere.db");

    let err = open_existing(&db_path).await.expect_err("open must fail");
    assert!(matches!(err, StoreError::DatabaseNotFound { .. }));
    assert!(err.to_string().contains("nowhere.db"));
    assert!(!db_path.exists());
}

#[tokio::test]
async fn unknown_header_column_is_a_schema_mismatch() {
    let dir = temp_dir("bad_header");
    generate_into(&dir);
    std::fs::write(
        dir.join(EntityKind::Category.file_name()),
        "id,name,colour\n1,Desk,red\n",
    )
    .expect("overwrite categories");
    let db_path = dir.join("ecommerce.db");

    let err = load_dataset(&db_path, &dir)
        .await
        .expect_err("load must fail");
    match err {
        StoreError::SchemaMismatch { table, message } => {
            assert_eq!(table, "categories");
            assert!(message.contains("colour"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

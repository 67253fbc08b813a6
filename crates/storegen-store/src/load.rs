use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use sqlx::{Sqlite, Transaction};
use tracing::info;

use storegen_core::EntityKind;

use crate::db::create_database;
use crate::errors::StoreError;
use crate::schema::{LOAD_ORDER, create_table_sql, insert_sql};

/// Rows inserted into one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableLoad {
    pub table: String,
    pub rows: u64,
}

/// Summary of a completed load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub database: PathBuf,
    pub tables: Vec<TableLoad>,
}

impl LoadReport {
    pub fn rows_for(&self, table: &str) -> Option<u64> {
        self.tables
            .iter()
            .find(|entry| entry.table == table)
            .map(|entry| entry.rows)
    }
}

/// Rebuild `db_path` from the CSV files in `data_dir`.
///
/// All five files must exist before the database is touched. Any existing
/// database file is replaced; tables and rows are written in one transaction.
pub async fn load_dataset(db_path: &Path, data_dir: &Path) -> Result<LoadReport, StoreError> {
    let start = Instant::now();
    let inputs = resolve_inputs(data_dir)?;

    if db_path.exists() {
        std::fs::remove_file(db_path)?;
    }
    let pool = create_database(db_path).await?;
    let mut tx = pool.begin().await?;

    for (kind, _) in &inputs {
        sqlx::query(create_table_sql(*kind)).execute(&mut *tx).await?;
    }
    info!(tables = inputs.len(), "tables created");

    let mut tables = Vec::with_capacity(inputs.len());
    for (kind, path) in &inputs {
        let rows = insert_file(&mut tx, *kind, path).await?;
        info!(table = kind.table(), rows, "rows inserted");
        tables.push(TableLoad {
            table: kind.table().to_string(),
            rows,
        });
    }

    tx.commit().await?;
    pool.close().await;

    info!(
        database = %db_path.display(),
        duration_ms = start.elapsed().as_millis() as u64,
        "database populated"
    );

    Ok(LoadReport {
        database: db_path.to_path_buf(),
        tables,
    })
}

fn resolve_inputs(data_dir: &Path) -> Result<Vec<(EntityKind, PathBuf)>, StoreError> {
    LOAD_ORDER
        .iter()
        .map(|kind| {
            let path = data_dir.join(kind.file_name());
            if path.is_file() {
                Ok((*kind, path))
            } else {
                Err(StoreError::MissingInput { path })
            }
        })
        .collect()
}

async fn insert_file(
    tx: &mut Transaction<'_, Sqlite>,
    kind: EntityKind,
    path: &Path,
) -> Result<u64, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    let columns = validate_header(kind, reader.headers()?)?;
    let sql = insert_sql(kind, &columns);

    let mut rows = 0_u64;
    for record in reader.records() {
        let record = record?;
        let mut query = sqlx::query(&sql);
        for value in record.iter() {
            query = query.bind(value.to_string());
        }
        query.execute(&mut **tx).await?;
        rows += 1;
    }
    Ok(rows)
}

fn validate_header(kind: EntityKind, header: &csv::StringRecord) -> Result<Vec<String>, StoreError> {
    let known = kind.columns();
    let columns: Vec<String> = header.iter().map(|name| name.trim().to_string()).collect();
    if columns.is_empty() {
        return Err(StoreError::SchemaMismatch {
            table: kind.table().to_string(),
            message: "header row is empty".to_string(),
        });
    }
    for column in &columns {
        if !known.contains(&column.as_str()) {
            return Err(StoreError::SchemaMismatch {
                table: kind.table().to_string(),
                message: format!("unknown column '{column}'"),
            });
        }
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_with_known_columns_is_accepted() {
        let header = csv::StringRecord::from(vec!["id", "name", "description"]);
        let columns = validate_header(EntityKind::Category, &header).expect("valid header");
        assert_eq!(columns, vec!["id", "name", "description"]);
    }

    #[test]
    fn header_with_unknown_column_is_rejected() {
        let header = csv::StringRecord::from(vec!["id", "name", "category_id"]);
        let err = validate_header(EntityKind::Product, &header).expect_err("unknown column");
        assert!(matches!(err, StoreError::SchemaMismatch { .. }));
        assert!(err.to_string().contains("category_id"));
    }
}

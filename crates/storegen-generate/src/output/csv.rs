use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use storegen_core::TableRecord;

/// Write records as CSV: a header line from `T::COLUMNS`, then one line per
/// record in slice order. The header is written even when `rows` is empty.
///
/// Returns the number of bytes written.
pub fn write_records<T: TableRecord>(path: &Path, rows: &[T]) -> Result<u64, csv::Error> {
    let writer = BufWriter::new(File::create(path).map_err(csv::Error::from)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(T::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    let mut counting = writer.into_inner().map_err(|err| err.into_error())?;
    counting.flush()?;
    Ok(counting.bytes_written())
}

/// Read records back from a CSV file written by [`write_records`].
pub fn read_records<T: TableRecord>(path: &Path) -> Result<Vec<T>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    reader.deserialize().collect()
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;
    use storegen_core::{Category, Order, ProductRow};

    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "storegen_csv_{}_{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir.join(format!("{name}.csv"))
    }

    #[test]
    fn empty_collection_still_writes_header() {
        let path = temp_file("empty_categories");
        let bytes = write_records::<Category>(&path, &[]).expect("write csv");
        let contents = std::fs::read_to_string(&path).expect("read csv");
        assert_eq!(contents, "id,name,description\n");
        assert_eq!(bytes, contents.len() as u64);
    }

    #[test]
    fn quotes_fields_with_delimiters() {
        let path = temp_file("quoted_categories");
        let rows = vec![Category {
            id: 1,
            name: "Garden".to_string(),
            description: "Fresh, green, \"organic\" things.".to_string(),
        }];
        write_records(&path, &rows).expect("write csv");
        let contents = std::fs::read_to_string(&path).expect("read csv");
        assert_eq!(
            contents,
            "id,name,description\n1,Garden,\"Fresh, green, \"\"organic\"\" things.\"\n"
        );
        let parsed: Vec<Category> = read_records(&path).expect("read back");
        assert_eq!(parsed, rows);
    }

    #[test]
    fn typed_values_survive_a_round_trip() {
        let path = temp_file("orders_round_trip");
        let rows = vec![
            Order {
                id: 1,
                customer_id: 4,
                order_date: NaiveDate::from_ymd_opt(2025, 3, 9).expect("valid date"),
                total_amount: 0.0,
            },
            Order {
                id: 2,
                customer_id: 1,
                order_date: NaiveDate::from_ymd_opt(2024, 11, 30).expect("valid date"),
                total_amount: 1043.07,
            },
        ];
        write_records(&path, &rows).expect("write csv");
        let contents = std::fs::read_to_string(&path).expect("read csv");
        assert!(contents.contains("1,4,2025-03-09,0.0\n"));
        assert!(contents.contains("2,1,2024-11-30,1043.07\n"));
        let parsed: Vec<Order> = read_records(&path).expect("read back");
        assert_eq!(parsed, rows);
    }

    #[test]
    fn product_rows_use_category_name_column() {
        let path = temp_file("products_projection");
        let rows = vec![ProductRow {
            id: 1,
            name: "Visionary fault-tolerant hub".to_string(),
            category: "Kitchen".to_string(),
            price: 49.5,
            stock: 12,
        }];
        write_records(&path, &rows).expect("write csv");
        let contents = std::fs::read_to_string(&path).expect("read csv");
        assert_eq!(
            contents,
            "id,name,category,price,stock\n1,Visionary fault-tolerant hub,Kitchen,49.5,12\n"
        );
    }
}

//! CSV Load/Store

use crate::{Table, TableError, Value};
use std::path::Path;
use tracing::info;

/// Read a comma-delimited file with a header row into a table.
pub fn read_csv(path: &Path) -> Result<Table, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Value::from_raw).collect());
    }

    let table = Table::new(columns, rows)?;
    info!(
        path = %path.display(),
        rows = table.n_rows(),
        columns = table.n_columns(),
        "loaded dataset"
    );
    Ok(table)
}

/// Write a table to a comma-delimited file with a header row.
///
/// The parent directory is created if it does not exist.
pub fn write_csv(table: &Table, path: &Path) -> Result<(), TableError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.column_names())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|v| v.render()))?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = table.n_rows(), "wrote dataset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_classifies_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "surface_area,room_count,price").unwrap();
        writeln!(file, "85m2,tres,95000").unwrap();
        writeln!(file, "90,,120000").unwrap();
        drop(file);

        let table = read_csv(&path).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.rows()[0][0], Value::Text("85m2".to_string()));
        assert_eq!(table.rows()[0][2], Value::Number(95000.0));
        assert_eq!(table.rows()[1][1], Value::Missing);
    }

    #[test]
    fn test_write_creates_parent_and_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.csv");

        let table = Table::new(
            vec!["price".to_string(), "location_rural".to_string()],
            vec![
                vec![Value::Number(95000.0), Value::Number(1.0)],
                vec![Value::Number(120000.5), Value::Number(0.0)],
            ],
        )
        .unwrap();

        write_csv(&table, &path).unwrap();
        let read_back = read_csv(&path).unwrap();
        assert_eq!(read_back, table);
    }
}

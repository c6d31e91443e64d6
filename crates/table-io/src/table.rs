//! In-Memory Table

use crate::{TableError, Value};

/// A rectangular table of named columns over mixed-type cells.
///
/// Rows are stored row-major; every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from column names and row-major cells.
    ///
    /// Fails if any row length disagrees with the header length.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, TableError> {
        let width = columns.len();
        for row in &rows {
            if row.len() != width {
                return Err(TableError::LengthMismatch {
                    column: "<row>".to_string(),
                    expected: width,
                    actual: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Create an empty table with the given header.
    pub fn with_columns(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Row-major cell access.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Whether a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Clone out one column by name.
    pub fn column(&self, name: &str) -> Result<Vec<Value>, TableError> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|r| r[idx].clone()).collect())
    }

    /// Replace the cells of an existing column.
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) -> Result<(), TableError> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))?;
        if values.len() != self.rows.len() {
            return Err(TableError::LengthMismatch {
                column: name.to_string(),
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[idx] = value;
        }
        Ok(())
    }

    /// Append a new column at the end of the table.
    pub fn push_column(&mut self, name: &str, values: Vec<Value>) -> Result<(), TableError> {
        if self.has_column(name) {
            return Err(TableError::DuplicateColumn(name.to_string()));
        }
        if values.len() != self.rows.len() {
            return Err(TableError::LengthMismatch {
                column: name.to_string(),
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Remove a column; a no-op if the column does not exist.
    pub fn drop_column(&mut self, name: &str) {
        if let Some(idx) = self.index_of(name) {
            self.columns.remove(idx);
            for row in &mut self.rows {
                row.remove(idx);
            }
        }
    }

    /// Keep only the rows whose index satisfies the predicate.
    ///
    /// Returns the number of rows removed.
    pub fn retain_rows<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(usize) -> bool,
    {
        let before = self.rows.len();
        let mut idx = 0;
        self.rows.retain(|_| {
            let kept = keep(idx);
            idx += 1;
            kept
        });
        before - self.rows.len()
    }
}

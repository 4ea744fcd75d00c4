use std::path::{Path, PathBuf};

use calamine::{DataType, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::Workbook;

use crate::error::StoreError;
use crate::store::{MemoryStore, TabularStore};

/// Workbook-backed tabular store.
///
/// Sheets are loaded eagerly into a [`MemoryStore`], mutated in memory, and
/// written back with [`save`](XlsxStore::save). The planner core never sees
/// the workbook; it only sees the [`TabularStore`] contract.
#[derive(Debug)]
pub struct XlsxStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl XlsxStore {
    /// Creates an empty store that will persist to `path`.
    pub fn create(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            inner: MemoryStore::new(),
        }
    }

    /// Loads every sheet of the workbook at `path`.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let mut workbook: Xlsx<_> = open_workbook(path)?;
        let mut inner = MemoryStore::new();

        let sheet_names = workbook.sheet_names().to_owned();
        for name in sheet_names {
            let range = workbook
                .worksheet_range(&name)
                .ok_or_else(|| StoreError::InvalidWorkbook(format!("missing sheet '{name}'")))?
                .map_err(StoreError::from)?;
            let rows = range
                .rows()
                .map(|row| row.iter().map(cell_to_string).collect())
                .collect();
            inner.insert_raw_table(&name, rows);
        }

        Ok(Self {
            path: path.to_path_buf(),
            inner,
        })
    }

    /// Writes every table back to the workbook file.
    pub fn save(&self) -> Result<(), StoreError> {
        let mut workbook = Workbook::new();

        for name in self.inner.table_names() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&name)?;

            for (row_idx, row) in self.inner.get_all_rows(&name)?.iter().enumerate() {
                for (col_idx, cell) in row.iter().enumerate() {
                    match (row_idx, cell.parse::<i64>()) {
                        (0, _) | (_, Err(_)) => {
                            worksheet.write_string(row_idx as u32, col_idx as u16, cell)?;
                        }
                        (_, Ok(value)) => {
                            worksheet.write_number(row_idx as u32, col_idx as u16, value as f64)?;
                        }
                    }
                }
            }
        }

        workbook.save(&self.path)?;
        Ok(())
    }

    /// Creates a table whose heading row holds the given lane names.
    pub fn create_table(&mut self, name: &str, headings: &[String]) -> Result<(), StoreError> {
        self.inner.create_table(name, headings)
    }
}

impl TabularStore for XlsxStore {
    fn get_column(&self, table: &str, index: usize) -> Result<Vec<String>, StoreError> {
        self.inner.get_column(table, index)
    }

    fn get_all_rows(&self, table: &str) -> Result<Vec<Vec<String>>, StoreError> {
        self.inner.get_all_rows(table)
    }

    fn append_row(&mut self, table: &str, values: &[i64]) -> Result<(), StoreError> {
        self.inner.append_row(table, values)
    }

    fn insert_column(
        &mut self,
        table: &str,
        position: usize,
        heading: &str,
        values: &[String],
    ) -> Result<(), StoreError> {
        self.inner.insert_column(table, position, heading, values)
    }

    fn delete_column(&mut self, table: &str, index: usize) -> Result<(), StoreError> {
        self.inner.delete_column(table, index)
    }

    fn delete_rows(&mut self, table: &str, start: usize, end: usize) -> Result<(), StoreError> {
        self.inner.delete_rows(table, start, end)
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => {
            if value.fract() == 0.0 {
                (*value as i64).to_string()
            } else {
                value.to_string()
            }
        }
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

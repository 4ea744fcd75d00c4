//! Backing tabular stores.
//!
//! The planner core only ever talks to [`TabularStore`]; the concrete store
//! is an adapter. [`MemoryStore`] carries the canonical row-grid semantics
//! and [`XlsxStore`] persists the same grid to a workbook file.

pub mod memory;
pub mod xlsx;

pub use memory::MemoryStore;
pub use xlsx::XlsxStore;

use crate::error::StoreError;

/// Contract with the backing tabular store.
///
/// All row and column indices are 1-based; row 1 is the heading row. The
/// store knows nothing about lanes or forecasts, only named tables of string
/// cells.
pub trait TabularStore {
    /// Returns the column at `index`: the heading cell first, then every
    /// data cell beneath it. Rows shorter than `index` contribute an empty
    /// cell.
    fn get_column(&self, table: &str, index: usize) -> Result<Vec<String>, StoreError>;

    /// Returns every row of the table; row 0 is the heading row.
    fn get_all_rows(&self, table: &str) -> Result<Vec<Vec<String>>, StoreError>;

    /// Appends a row of counts beneath the existing rows.
    fn append_row(&mut self, table: &str, values: &[i64]) -> Result<(), StoreError>;

    /// Inserts a column at `position` with the given heading; `values` are
    /// the data cells beneath it, one per existing data row.
    fn insert_column(
        &mut self,
        table: &str,
        position: usize,
        heading: &str,
        values: &[String],
    ) -> Result<(), StoreError>;

    /// Removes the column at `index` from every row.
    fn delete_column(&mut self, table: &str, index: usize) -> Result<(), StoreError>;

    /// Removes the inclusive row range `start..=end`.
    fn delete_rows(&mut self, table: &str, start: usize, end: usize) -> Result<(), StoreError>;
}

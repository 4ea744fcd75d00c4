use crate::error::StoreError;
use crate::store::TabularStore;

/// In-memory tabular store.
///
/// Tables keep their creation order so a persisting adapter can materialise
/// sheets deterministically. Cells are stored as strings, mirroring what a
/// spreadsheet service hands back.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Vec<Table>,
}

#[derive(Debug, Clone)]
struct Table {
    name: String,
    rows: Vec<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table whose heading row holds the given lane names.
    pub fn create_table(&mut self, name: &str, headings: &[String]) -> Result<(), StoreError> {
        if self.tables.iter().any(|table| table.name == name) {
            return Err(StoreError::InvalidWorkbook(format!(
                "table '{name}' already exists"
            )));
        }
        self.tables.push(Table {
            name: name.to_string(),
            rows: vec![headings.to_vec()],
        });
        Ok(())
    }

    /// Inserts a table with pre-existing rows, as loaded from a workbook.
    pub fn insert_raw_table(&mut self, name: &str, rows: Vec<Vec<String>>) {
        match self.tables.iter_mut().find(|table| table.name == name) {
            Some(table) => table.rows = rows,
            None => self.tables.push(Table {
                name: name.to_string(),
                rows,
            }),
        }
    }

    /// Table names in creation order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.name.clone()).collect()
    }

    fn table(&self, name: &str) -> Result<&Table, StoreError> {
        self.tables
            .iter()
            .find(|table| table.name == name)
            .ok_or_else(|| StoreError::UnknownTable(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table, StoreError> {
        self.tables
            .iter_mut()
            .find(|table| table.name == name)
            .ok_or_else(|| StoreError::UnknownTable(name.to_string()))
    }
}

impl Table {
    fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }
}

impl TabularStore for MemoryStore {
    fn get_column(&self, table: &str, index: usize) -> Result<Vec<String>, StoreError> {
        let table = self.table(table)?;
        if index == 0 || index > table.width() {
            return Err(StoreError::ColumnOutOfRange {
                table: table.name.clone(),
                index,
            });
        }
        Ok(table
            .rows
            .iter()
            .map(|row| row.get(index - 1).cloned().unwrap_or_default())
            .collect())
    }

    fn get_all_rows(&self, table: &str) -> Result<Vec<Vec<String>>, StoreError> {
        Ok(self.table(table)?.rows.clone())
    }

    fn append_row(&mut self, table: &str, values: &[i64]) -> Result<(), StoreError> {
        let table = self.table_mut(table)?;
        table
            .rows
            .push(values.iter().map(|value| value.to_string()).collect());
        Ok(())
    }

    fn insert_column(
        &mut self,
        table: &str,
        position: usize,
        heading: &str,
        values: &[String],
    ) -> Result<(), StoreError> {
        let table = self.table_mut(table)?;
        let width = table.width();
        if position == 0 || position > width + 1 {
            return Err(StoreError::ColumnOutOfRange {
                table: table.name.clone(),
                index: position,
            });
        }
        for (row_idx, row) in table.rows.iter_mut().enumerate() {
            if row.len() < position - 1 {
                row.resize(position - 1, String::new());
            }
            let cell = if row_idx == 0 {
                heading.to_string()
            } else {
                values.get(row_idx - 1).cloned().unwrap_or_default()
            };
            row.insert(position - 1, cell);
        }
        Ok(())
    }

    fn delete_column(&mut self, table: &str, index: usize) -> Result<(), StoreError> {
        let table = self.table_mut(table)?;
        if index == 0 || index > table.width() {
            return Err(StoreError::ColumnOutOfRange {
                table: table.name.clone(),
                index,
            });
        }
        for row in &mut table.rows {
            if row.len() >= index {
                row.remove(index - 1);
            }
        }
        Ok(())
    }

    fn delete_rows(&mut self, table: &str, start: usize, end: usize) -> Result<(), StoreError> {
        let table = self.table_mut(table)?;
        if start == 0 || start > end || end > table.rows.len() {
            return Err(StoreError::RowOutOfRange {
                table: table.name.clone(),
                start,
                end,
            });
        }
        table.rows.drain(start - 1..end);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_rows() -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .create_table("loaded", &["east".to_string(), "west".to_string()])
            .unwrap();
        store.append_row("loaded", &[10, 20]).unwrap();
        store.append_row("loaded", &[30, 40]).unwrap();
        store
    }

    #[test]
    fn get_column_includes_heading_cell() {
        let store = store_with_rows();
        assert_eq!(store.get_column("loaded", 1).unwrap(), ["east", "10", "30"]);
        assert_eq!(store.get_column("loaded", 2).unwrap(), ["west", "20", "40"]);
    }

    #[test]
    fn column_index_is_one_based_and_bounded() {
        let store = store_with_rows();
        assert!(matches!(
            store.get_column("loaded", 0),
            Err(StoreError::ColumnOutOfRange { .. })
        ));
        assert!(matches!(
            store.get_column("loaded", 3),
            Err(StoreError::ColumnOutOfRange { .. })
        ));
    }

    #[test]
    fn insert_and_delete_column_keep_rows_rectangular() {
        let mut store = store_with_rows();
        store
            .insert_column("loaded", 3, "north", &["0".to_string(), "0".to_string()])
            .unwrap();
        assert_eq!(
            store.get_all_rows("loaded").unwrap()[0],
            ["east", "west", "north"]
        );
        assert_eq!(store.get_all_rows("loaded").unwrap()[1], ["10", "20", "0"]);

        store.delete_column("loaded", 1).unwrap();
        assert_eq!(store.get_all_rows("loaded").unwrap()[0], ["west", "north"]);
        assert_eq!(store.get_all_rows("loaded").unwrap()[2], ["40", "0"]);
    }

    #[test]
    fn delete_rows_is_inclusive() {
        let mut store = store_with_rows();
        store.delete_rows("loaded", 2, 3).unwrap();
        assert_eq!(store.get_all_rows("loaded").unwrap().len(), 1);
    }

    #[test]
    fn unknown_table_is_reported() {
        let store = store_with_rows();
        assert!(matches!(
            store.get_all_rows("planned"),
            Err(StoreError::UnknownTable(name)) if name == "planned"
        ));
    }
}

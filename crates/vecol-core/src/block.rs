//! Named, typed columns grouped into a batch of rows.

use crate::column::Column;
use crate::data_type::DataType;

/// A column together with its logical type and name.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnWithTypeAndName {
    /// Column data.
    pub column: Column,
    /// Logical type.
    pub data_type: DataType,
    /// Name used in output.
    pub name: String,
}

impl ColumnWithTypeAndName {
    /// Creates a named column.
    pub fn new(column: Column, data_type: DataType, name: impl Into<String>) -> Self {
        Self {
            column,
            data_type,
            name: name.into(),
        }
    }
}

/// A batch of equally sized columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    columns: Vec<ColumnWithTypeAndName>,
}

impl Block {
    /// Creates a block.
    ///
    /// # Panics
    ///
    /// Panics if the columns differ in length.
    #[must_use]
    pub fn new(columns: Vec<ColumnWithTypeAndName>) -> Self {
        if let Some(first) = columns.first() {
            let rows = first.column.len();
            assert!(
                columns.iter().all(|c| c.column.len() == rows),
                "Block columns must have the same number of rows"
            );
        }
        Self { columns }
    }

    /// Columns in positional order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnWithTypeAndName] {
        &self.columns
    }

    /// Number of rows; zero for a block without columns.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.column.len())
    }

    /// Appends a column.
    ///
    /// # Panics
    ///
    /// Panics if the column length differs from the block's.
    pub fn insert(&mut self, column: ColumnWithTypeAndName) {
        if !self.columns.is_empty() {
            assert_eq!(
                column.column.len(),
                self.rows(),
                "Block columns must have the same number of rows"
            );
        }
        self.columns.push(column);
    }
}

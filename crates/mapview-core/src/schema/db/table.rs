use super::{Column, ColumnId, ContainerId};

use std::fmt;

/// A database table
#[derive(Debug)]
pub struct Table {
    /// Uniquely identifies a table
    pub id: TableId,

    /// Store container the table belongs to
    pub container: ContainerId,

    /// Name of the table
    pub name: String,

    /// The table's columns
    pub columns: Vec<Column>,

    pub primary_key: Vec<ColumnId>,
}

/// Uniquely identifies a table
#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct TableId(pub usize);

impl Table {
    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        let id = id.into();
        assert_eq!(self.id, id.table, "column belongs to a different table");
        &self.columns[id.index]
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key_columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.primary_key
            .iter()
            .map(|column_id| &self.columns[column_id.index])
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}

use super::{Column, ColumnId, Container, ContainerId, Table, TableId};

/// Database-level schema
#[derive(Debug, Default)]
pub struct Schema {
    pub containers: Vec<Container>,

    pub tables: Vec<Table>,
}

impl Schema {
    pub fn container(&self, id: ContainerId) -> &Container {
        self.containers.get(id.0).expect("invalid store container ID")
    }

    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        self.tables.get(id.into().0).expect("invalid table ID")
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        let id = id.into();
        self.table(id.table).column(id)
    }

    pub fn tables_in(&self, container: ContainerId) -> impl Iterator<Item = &Table> + '_ {
        self.container(container)
            .tables
            .iter()
            .map(move |table| self.table(*table))
    }
}

//! Store (table-level) schema

mod column;
pub use column::{Column, ColumnId};

mod container;
pub use container::{Container, ContainerId};

mod schema;
pub use schema::Schema;

mod table;
pub use table::{Table, TableId};

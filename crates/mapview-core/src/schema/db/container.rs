use super::TableId;
use std::fmt;

/// A named set of store tables.
#[derive(Debug, Clone)]
pub struct Container {
    pub id: ContainerId,

    pub name: String,

    pub tables: Vec<TableId>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub usize);

impl fmt::Debug for ContainerId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "db::ContainerId({})", self.0)
    }
}

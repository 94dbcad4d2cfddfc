use super::{app, db};

/// An addressable mapped unit: a conceptual entity set or association set,
/// or a store table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Extent {
    EntitySet(app::EntitySetId),
    AssociationSet(app::AssociationSetId),
    Table(db::TableId),
}

/// Either side of a mapped container pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerRef {
    Conceptual(app::ContainerId),
    Store(db::ContainerId),
}

impl Extent {
    /// The conceptual container declaring the extent. `None` for tables.
    pub fn conceptual_container(self) -> Option<app::ContainerId> {
        match self {
            Self::EntitySet(id) => Some(id.container),
            Self::AssociationSet(id) => Some(id.container),
            Self::Table(_) => None,
        }
    }

    pub fn as_entity_set(self) -> Option<app::EntitySetId> {
        match self {
            Self::EntitySet(id) => Some(id),
            _ => None,
        }
    }
}

impl From<app::EntitySetId> for Extent {
    fn from(value: app::EntitySetId) -> Self {
        Self::EntitySet(value)
    }
}

impl From<app::AssociationSetId> for Extent {
    fn from(value: app::AssociationSetId) -> Self {
        Self::AssociationSet(value)
    }
}

impl From<db::TableId> for Extent {
    fn from(value: db::TableId) -> Self {
        Self::Table(value)
    }
}

impl From<app::ContainerId> for ContainerRef {
    fn from(value: app::ContainerId) -> Self {
        Self::Conceptual(value)
    }
}

impl From<db::ContainerId> for ContainerRef {
    fn from(value: db::ContainerId) -> Self {
        Self::Store(value)
    }
}

use super::{AssociationId, ModelId};
use std::fmt;

/// A named set of conceptual extents.
#[derive(Debug, Clone)]
pub struct Container {
    pub id: ContainerId,

    pub name: String,

    pub entity_sets: Vec<EntitySet>,

    pub association_sets: Vec<AssociationSet>,
}

#[derive(Debug, Clone)]
pub struct EntitySet {
    pub id: EntitySetId,

    pub name: String,

    /// Element type. The set may also hold instances of its subtypes.
    pub model: ModelId,
}

#[derive(Debug, Clone)]
pub struct AssociationSet {
    pub id: AssociationSetId,

    pub name: String,

    pub association: AssociationId,

    /// Entity set bound to each association end, in end order.
    pub ends: [EntitySetId; 2],
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub usize);

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EntitySetId {
    pub container: ContainerId,
    pub index: usize,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct AssociationSetId {
    pub container: ContainerId,
    pub index: usize,
}

impl Container {
    pub fn entity_set_by_name(&self, name: &str) -> Option<&EntitySet> {
        self.entity_sets.iter().find(|set| set.name == name)
    }

    pub fn association_set_by_name(&self, name: &str) -> Option<&AssociationSet> {
        self.association_sets.iter().find(|set| set.name == name)
    }
}

impl fmt::Debug for ContainerId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ContainerId({})", self.0)
    }
}

impl fmt::Debug for EntitySetId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "EntitySetId({}/{})", self.container.0, self.index)
    }
}

impl fmt::Debug for AssociationSetId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "AssociationSetId({}/{})", self.container.0, self.index)
    }
}

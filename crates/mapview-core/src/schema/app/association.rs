use super::{ForeignKey, ModelId};
use std::fmt;

/// A relationship type between two entity types.
#[derive(Debug, Clone)]
pub struct Association {
    pub id: AssociationId,

    pub name: String,

    pub ends: [AssociationEnd; 2],

    /// Referential constraints declared on the association.
    pub constraints: Vec<ForeignKey>,

    /// When set, the relationship is fully encoded by the dependent's
    /// foreign-key fields; there is no separate link table.
    pub is_foreign_key: bool,

    pub is_abstract: bool,
}

#[derive(Debug, Clone)]
pub struct AssociationEnd {
    /// Role name of the end
    pub name: String,

    pub model: ModelId,

    pub multiplicity: Multiplicity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    One,
    ZeroOrOne,
    Many,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct AssociationId(pub usize);

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct AssociationEndId {
    pub association: AssociationId,
    pub index: usize,
}

impl Association {
    /// The single referential constraint of a foreign-key association.
    ///
    /// Returns `None` for independent associations and for associations that
    /// do not declare exactly one constraint.
    pub fn foreign_key(&self) -> Option<&ForeignKey> {
        match &self.constraints[..] {
            [fk] if self.is_foreign_key => Some(fk),
            _ => None,
        }
    }

    pub fn end(&self, index: usize) -> &AssociationEnd {
        &self.ends[index]
    }

    pub fn end_id(&self, index: usize) -> AssociationEndId {
        assert!(index < 2, "association ends are indexed 0 or 1");
        AssociationEndId {
            association: self.id,
            index,
        }
    }
}

impl Multiplicity {
    pub fn is_optional(self) -> bool {
        matches!(self, Self::ZeroOrOne)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::ZeroOrOne => "0..1",
            Self::Many => "*",
        }
    }
}

impl fmt::Debug for AssociationId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "AssociationId({})", self.0)
    }
}

impl fmt::Debug for AssociationEndId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "AssociationEndId({}/{})", self.association.0, self.index)
    }
}

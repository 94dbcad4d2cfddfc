use super::{AssociationEndId, AssociationId, ModelId};
use crate::stmt;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Field {
    /// Uniquely identifies the field within the declaring model.
    pub id: FieldId,

    /// The field name
    pub name: String,

    /// Primitive, embedded or navigation
    pub ty: FieldTy,

    /// True if the field can hold null.
    pub nullable: bool,

    /// Whether the field takes part in optimistic concurrency checks.
    pub concurrency: ConcurrencyMode,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId {
    pub model: ModelId,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub enum FieldTy {
    Primitive(FieldPrimitive),
    Embedded(Embedded),
    Navigation(Navigation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPrimitive {
    pub ty: stmt::Type,
}

/// A field whose value is an instance of an embedded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Embedded {
    pub target: ModelId,
}

/// A field that navigates an association from one of its ends to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub association: AssociationId,

    /// Index of the end the declaring model plays.
    pub from: usize,

    /// Index of the end the navigation arrives at.
    pub to: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConcurrencyMode {
    #[default]
    None,

    /// The original value is compared when the row is updated or deleted.
    Fixed,
}

impl Field {
    pub fn is_primitive(&self) -> bool {
        matches!(self.ty, FieldTy::Primitive(_))
    }

    pub fn is_navigation(&self) -> bool {
        matches!(self.ty, FieldTy::Navigation(_))
    }

    pub fn is_concurrency_token(&self) -> bool {
        self.concurrency == ConcurrencyMode::Fixed
    }
}

impl FieldTy {
    pub fn as_embedded(&self) -> Option<&Embedded> {
        match self {
            Self::Embedded(embedded) => Some(embedded),
            _ => None,
        }
    }

    pub fn as_navigation(&self) -> Option<&Navigation> {
        match self {
            Self::Navigation(navigation) => Some(navigation),
            _ => None,
        }
    }
}

impl Navigation {
    /// The end the navigation arrives at.
    pub fn to_end(&self) -> AssociationEndId {
        AssociationEndId {
            association: self.association,
            index: self.to,
        }
    }
}

impl From<&Field> for FieldId {
    fn from(value: &Field) -> Self {
        value.id
    }
}

impl From<&FieldId> for FieldId {
    fn from(value: &FieldId) -> Self {
        *value
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.model.0, self.index)
    }
}

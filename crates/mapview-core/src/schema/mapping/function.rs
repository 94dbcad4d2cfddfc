use crate::schema::app::{AssociationEndId, FieldId, ModelId};

/// Binds insert, update or delete of one type to a stored procedure.
#[derive(Debug, Clone)]
pub struct FunctionMapping {
    pub ty: ModelId,

    pub kind: FunctionKind,

    /// Name of the stored procedure in the store.
    pub function: String,

    pub parameters: Vec<ParameterBinding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterBinding {
    pub parameter: String,

    pub member: ParameterMember,

    pub version: ParameterVersion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterMember {
    /// Path from the entity through embedded fields to a primitive field.
    Field(Vec<FieldId>),

    /// A key field of the entity at the far end of an association.
    End { end: AssociationEndId, field: FieldId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterVersion {
    Current,
    Original,
}

impl FunctionKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

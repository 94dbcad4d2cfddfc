use super::{Expr, ExprRecord};
use crate::schema::app::EntitySetId;

/// A reference to an entity in `entity_set`, identified by key values.
///
/// Building a reference never reads the referenced entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprRef {
    pub entity_set: EntitySetId,

    /// Key values, in the order of the referenced type's key fields.
    pub key: ExprRecord,
}

impl Expr {
    pub fn create_ref(entity_set: EntitySetId, key: impl Into<ExprRecord>) -> Self {
        ExprRef {
            entity_set,
            key: key.into(),
        }
        .into()
    }

    pub fn as_ref_expr(&self) -> Option<&ExprRef> {
        match self {
            Self::Ref(expr_ref) => Some(expr_ref),
            _ => None,
        }
    }
}

impl From<ExprRef> for Expr {
    fn from(value: ExprRef) -> Self {
        Self::Ref(value)
    }
}

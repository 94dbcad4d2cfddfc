use super::Expr;
use crate::schema::app::FieldId;

/// References a field of the entity row produced by the query's source.
///
/// The field may be declared on the row's type or on any of its base types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprField {
    pub field: FieldId,
}

impl Expr {
    pub fn field(field: impl Into<FieldId>) -> Self {
        ExprField {
            field: field.into(),
        }
        .into()
    }

    pub fn as_field(&self) -> Option<&ExprField> {
        match self {
            Self::Field(expr_field) => Some(expr_field),
            _ => None,
        }
    }
}

impl From<ExprField> for Expr {
    fn from(value: ExprField) -> Self {
        Self::Field(value)
    }
}

use super::Expr;
use crate::schema::app::AssociationId;

/// Constructs an instance of `association` from one expression per end.
///
/// `ends` is ordered like the association's declared ends.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprRelationship {
    pub association: AssociationId,
    pub ends: Vec<Expr>,
}

impl Expr {
    pub fn relationship(association: AssociationId, ends: Vec<Expr>) -> Self {
        ExprRelationship { association, ends }.into()
    }

    pub fn as_relationship(&self) -> Option<&ExprRelationship> {
        match self {
            Self::Relationship(expr_relationship) => Some(expr_relationship),
            _ => None,
        }
    }
}

impl From<ExprRelationship> for Expr {
    fn from(value: ExprRelationship) -> Self {
        Self::Relationship(value)
    }
}

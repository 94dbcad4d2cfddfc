use super::Expr;
use crate::schema::app::ModelId;

/// Tests whether the scanned row is an instance of `ty`.
///
/// With `only` unset, instances of any subtype of `ty` also match
/// ("of type" semantics). With `only` set, the row's type must be exactly
/// `ty` ("of type only").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprIsOf {
    pub ty: ModelId,
    pub only: bool,
}

impl Expr {
    pub fn is_of(ty: ModelId) -> Self {
        ExprIsOf { ty, only: false }.into()
    }

    pub fn is_of_only(ty: ModelId) -> Self {
        ExprIsOf { ty, only: true }.into()
    }

    pub fn as_is_of(&self) -> Option<&ExprIsOf> {
        match self {
            Self::IsOf(expr_is_of) => Some(expr_is_of),
            _ => None,
        }
    }
}

impl From<ExprIsOf> for Expr {
    fn from(value: ExprIsOf) -> Self {
        Self::IsOf(value)
    }
}

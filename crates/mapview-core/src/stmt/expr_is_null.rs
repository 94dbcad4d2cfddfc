use super::Expr;

/// Null test on a single operand, printed `x IS NULL` or `x IS NOT NULL`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprIsNull {
    /// `IS NOT NULL` when set
    pub negate: bool,

    pub expr: Box<Expr>,
}

impl ExprIsNull {
    fn new(expr: Expr, negate: bool) -> Self {
        Self {
            negate,
            expr: Box::new(expr),
        }
    }
}

impl Expr {
    pub fn is_null(expr: impl Into<Self>) -> Self {
        ExprIsNull::new(expr.into(), false).into()
    }

    /// Keeps rows whose `expr` holds a value. Synthesized foreign-key views
    /// use it to drop rows without a principal.
    pub fn is_not_null(expr: impl Into<Self>) -> Self {
        ExprIsNull::new(expr.into(), true).into()
    }

    pub fn as_is_null(&self) -> Option<&ExprIsNull> {
        match self {
            Self::IsNull(expr_is_null) => Some(expr_is_null),
            _ => None,
        }
    }
}

impl From<ExprIsNull> for Expr {
    fn from(value: ExprIsNull) -> Self {
        Self::IsNull(value)
    }
}

use super::Expr;

use std::ops;

/// A record of expressions.
///
/// Represents a fixed-size, heterogeneous collection of expressions accessed by
/// position. Like Rust tuples, each field can have a different type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExprRecord {
    /// The field expressions in positional order.
    pub fields: Vec<Expr>,
}

impl Expr {
    pub fn record<T>(items: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Self>,
    {
        Self::Record(ExprRecord::from_iter(items))
    }

    pub fn as_record(&self) -> Option<&ExprRecord> {
        match self {
            Self::Record(expr_record) => Some(expr_record),
            _ => None,
        }
    }
}

impl ExprRecord {
    pub fn from_vec(fields: Vec<Expr>) -> Self {
        Self { fields }
    }
}

impl ops::Deref for ExprRecord {
    type Target = [Expr];

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

impl<T: Into<Expr>> FromIterator<T> for ExprRecord {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a ExprRecord {
    type IntoIter = std::slice::Iter<'a, Expr>;
    type Item = &'a Expr;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl From<ExprRecord> for Expr {
    fn from(value: ExprRecord) -> Self {
        Self::Record(value)
    }
}

impl From<Vec<Expr>> for ExprRecord {
    fn from(fields: Vec<Expr>) -> Self {
        Self::from_vec(fields)
    }
}

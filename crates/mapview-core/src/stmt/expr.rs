use super::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND a set of boolean expressions
    And(ExprAnd),

    /// References a field of the scanned entity row
    Field(ExprField),

    /// Whether an expression is (or is not) null. This is different from a
    /// binary expression because of how databases treat null comparisons.
    IsNull(ExprIsNull),

    /// Whether the scanned row is an instance of a type
    IsOf(ExprIsOf),

    /// Evaluates to a tuple value
    Record(ExprRecord),

    /// Builds a reference to an entity from its key values
    Ref(ExprRef),

    /// Builds a relationship instance from its end references
    Relationship(ExprRelationship),

    /// Evaluates to a constant value
    Value(Value),
}

impl Expr {
    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    /// Returns true if the expression is the `true` boolean expression
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(true)))
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::Value(Value::default())
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

use crate::{
    schema::{
        app::{AssociationEndId, FieldId},
        db::{ColumnId, TableId},
    },
    stmt,
};

/// Binds part of a type to one table.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub table: TableId,

    pub properties: Vec<PropertyMapping>,

    /// Row or value conditions restricting which rows the fragment covers.
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone)]
pub enum PropertyMapping {
    /// A primitive field stored in a column
    Scalar(ScalarMapping),

    /// An embedded field whose own fields are mapped recursively
    Embedded(EmbeddedMapping),

    /// An association end whose key fields are stored in columns
    End(EndMapping),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarMapping {
    pub field: FieldId,
    pub column: ColumnId,
}

#[derive(Debug, Clone)]
pub struct EmbeddedMapping {
    pub field: FieldId,
    pub properties: Vec<PropertyMapping>,
}

#[derive(Debug, Clone)]
pub struct EndMapping {
    pub end: AssociationEndId,

    /// Key fields of the end's type and the columns storing them.
    pub properties: Vec<ScalarMapping>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub target: ConditionTarget,
    pub predicate: ConditionPredicate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionTarget {
    Field(FieldId),
    Column(ColumnId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionPredicate {
    IsNull,
    IsNotNull,
    Eq(stmt::Value),
}

impl Fragment {
    pub fn new(table: TableId) -> Self {
        Self {
            table,
            properties: vec![],
            conditions: vec![],
        }
    }

    pub fn scalar(mut self, field: FieldId, column: ColumnId) -> Self {
        self.properties
            .push(PropertyMapping::Scalar(ScalarMapping { field, column }));
        self
    }

    pub fn property(mut self, property: PropertyMapping) -> Self {
        self.properties.push(property);
        self
    }

    pub fn condition(mut self, target: ConditionTarget, predicate: ConditionPredicate) -> Self {
        self.conditions.push(Condition { target, predicate });
        self
    }
}

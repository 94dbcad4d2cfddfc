use super::FieldId;

/// Key fields of the root of an entity type hierarchy.
///
/// Derived types inherit the key of their root; their own `PrimaryKey` is
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryKey {
    pub fields: Vec<FieldId>,
}

impl PrimaryKey {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.fields.contains(&field)
    }
}

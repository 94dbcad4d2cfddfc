use super::FieldId;

/// A referential constraint: the dependent end's `source` fields hold the
/// values of the principal end's key fields.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    /// Index of the principal end within the association.
    pub principal: usize,

    /// Index of the dependent end within the association.
    pub dependent: usize,

    pub fields: Vec<ForeignKeyField>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyField {
    /// The field on the dependent model that is acting as the foreign key
    pub source: FieldId,

    /// The key field on the principal model that this FK field maps to.
    pub target: FieldId,
}

impl ForeignKey {
    pub fn source_fields(&self) -> impl ExactSizeIterator<Item = FieldId> + '_ {
        self.fields.iter().map(|field| field.source)
    }
}

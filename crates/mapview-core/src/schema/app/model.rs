use super::{Field, FieldId, PrimaryKey};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the schema
    pub id: ModelId,

    /// Name of the model
    pub name: String,

    /// Fields declared by the model itself. Inherited fields live on the base
    /// model.
    pub fields: Vec<Field>,

    /// Distinguishes entity types from embedded (complex) types
    pub kind: ModelKind,
}

#[derive(Debug, Clone)]
pub enum ModelKind {
    /// Entity type that can be the element type of an entity set
    Entity(EntityModel),

    /// Complex type that is stored inline in its owner's rows
    Embedded,
}

#[derive(Debug, Clone, Default)]
pub struct EntityModel {
    /// Base type, if this type derives from another entity type.
    pub base: Option<ModelId>,

    /// Abstract types have no instances of their own.
    pub is_abstract: bool,

    /// Set on the root of the hierarchy only.
    pub primary_key: PrimaryKey,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub usize);

impl Model {
    pub fn is_entity(&self) -> bool {
        matches!(self.kind, ModelKind::Entity(_))
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.kind, ModelKind::Embedded)
    }

    pub fn as_entity(&self) -> Option<&EntityModel> {
        match &self.kind {
            ModelKind::Entity(entity) => Some(entity),
            ModelKind::Embedded => None,
        }
    }

    #[track_caller]
    pub fn expect_entity(&self) -> &EntityModel {
        match &self.kind {
            ModelKind::Entity(entity) => entity,
            ModelKind::Embedded => panic!("expected entity model; actual={}", self.name),
        }
    }

    pub fn expect_entity_mut(&mut self) -> &mut EntityModel {
        match &mut self.kind {
            ModelKind::Entity(entity) => entity,
            ModelKind::Embedded => panic!("expected entity model; actual={}", self.name),
        }
    }

    pub fn base(&self) -> Option<ModelId> {
        self.as_entity().and_then(|entity| entity.base)
    }

    pub fn is_abstract(&self) -> bool {
        self.as_entity().is_some_and(|entity| entity.is_abstract)
    }

    pub fn field(&self, field: impl Into<FieldId>) -> &Field {
        let field_id = field.into();
        assert_eq!(self.id, field_id.model);
        &self.fields[field_id.index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl ModelId {
    /// Create a `FieldId` representing the current model's field at index
    /// `index`.
    pub const fn field(self, index: usize) -> FieldId {
        FieldId { model: self, index }
    }
}

impl From<&Model> for ModelId {
    fn from(value: &Model) -> Self {
        value.id
    }
}

impl From<&ModelId> for ModelId {
    fn from(src: &ModelId) -> Self {
        *src
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}

//! Conceptual (entity-level) schema

mod association;
pub use association::{
    Association, AssociationEnd, AssociationEndId, AssociationId, Multiplicity,
};

mod container;
pub use container::{AssociationSet, AssociationSetId, Container, ContainerId, EntitySet, EntitySetId};

mod field;
pub use field::{ConcurrencyMode, Embedded, Field, FieldId, FieldPrimitive, FieldTy, Navigation};

mod fk;
pub use fk::{ForeignKey, ForeignKeyField};

mod model;
pub use model::{EntityModel, Model, ModelId, ModelKind};

mod pk;
pub use pk::PrimaryKey;

mod schema;
pub use schema::Schema;

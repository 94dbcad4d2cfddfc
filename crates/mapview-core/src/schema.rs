pub mod app;

mod builder;
pub use builder::Builder;

pub mod db;

mod extent;
pub use extent::{ContainerRef, Extent};

pub mod mapping;
use mapping::Mapping;

mod verify;

use crate::Result;

use indexmap::IndexMap;
use std::sync::Arc;

/// The conceptual schema, the store schema and the mapping between them.
///
/// Immutable once built. View caches hold it behind an `Arc` and assume it
/// never changes for as long as they live.
#[derive(Debug)]
pub struct Schema {
    /// Conceptual (entity-level) schema
    pub app: app::Schema,

    /// Store (table-level) schema
    pub db: Arc<db::Schema>,

    /// Maps the conceptual schema onto the store schema
    pub mapping: Mapping,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The container an extent is declared in.
    pub fn container_of(&self, extent: Extent) -> ContainerRef {
        match extent {
            Extent::EntitySet(id) => ContainerRef::Conceptual(id.container),
            Extent::AssociationSet(id) => ContainerRef::Conceptual(id.container),
            Extent::Table(id) => ContainerRef::Store(self.db.table(id).container),
        }
    }

    /// Resolves either side of a container pair to the conceptual container
    /// that owns the pair's mapping.
    ///
    /// Returns `None` when the container takes part in no mapping.
    pub fn canonical_container(&self, container: impl Into<ContainerRef>) -> Option<app::ContainerId> {
        match container.into() {
            ContainerRef::Conceptual(id) => self
                .mapping
                .containers
                .contains_key(&id)
                .then_some(id),
            ContainerRef::Store(id) => self
                .mapping
                .container_for_store(id)
                .map(|mapping| mapping.conceptual),
        }
    }

    /// Qualified name of an extent, `Container.Extent`.
    pub fn extent_name(&self, extent: Extent) -> String {
        match extent {
            Extent::EntitySet(id) => format!(
                "{}.{}",
                self.app.container(id.container).name,
                self.app.entity_set(id).name
            ),
            Extent::AssociationSet(id) => format!(
                "{}.{}",
                self.app.container(id.container).name,
                self.app.association_set(id).name
            ),
            Extent::Table(id) => {
                let table = self.db.table(id);
                format!("{}.{}", self.db.container(table.container).name, table.name)
            }
        }
    }

    /// Every extent on both sides of a mapped container pair: entity sets,
    /// then association sets, then tables.
    pub fn extents(&self, container: app::ContainerId) -> Vec<Extent> {
        let mapping = self.mapping.container(container);
        let conceptual = self.app.container(container);

        conceptual
            .entity_sets
            .iter()
            .map(|set| Extent::EntitySet(set.id))
            .chain(
                conceptual
                    .association_sets
                    .iter()
                    .map(|set| Extent::AssociationSet(set.id)),
            )
            .chain(
                self.db
                    .tables_in(mapping.store)
                    .map(|table| Extent::Table(table.id)),
            )
            .collect()
    }

    /// Extents of a mapped container pair keyed by their qualified names.
    pub fn extents_by_name(&self, container: app::ContainerId) -> IndexMap<String, Extent> {
        self.extents(container)
            .into_iter()
            .map(|extent| (self.extent_name(extent), extent))
            .collect()
    }

    /// Name identifying a container pair, `Conceptual:Store`. Pre-generated
    /// view artifacts declare the pair they were generated for by this name.
    pub fn container_pair_name(&self, container: app::ContainerId) -> String {
        let mapping = self.mapping.container(container);
        format!(
            "{}:{}",
            self.app.container(mapping.conceptual).name,
            self.db.container(mapping.store).name
        )
    }

    /// Element type of an entity set.
    pub fn element_type(&self, entity_set: app::EntitySetId) -> app::ModelId {
        self.app.entity_set(entity_set).model
    }
}

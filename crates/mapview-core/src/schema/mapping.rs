mod container;
pub use container::ContainerMapping;

mod extent;
pub use extent::{ExtentMapping, TypeMapping, TypeQueryView};

mod fragment;
pub use fragment::{
    Condition, ConditionPredicate, ConditionTarget, EmbeddedMapping, EndMapping, Fragment,
    PropertyMapping, ScalarMapping,
};

mod function;
pub use function::{
    FunctionKind, FunctionMapping, ParameterBinding, ParameterMember, ParameterVersion,
};

use super::{app, db, Extent};
use indexmap::IndexMap;

/// Defines the correspondence between conceptual containers and store
/// containers.
///
/// The mapping is constructed during schema building and remains immutable at
/// runtime. Views are derived from it once and cached for as long as the
/// mapping lives, so nothing may mutate it after it has been handed to a view
/// cache.
#[derive(Debug, Default, Clone)]
pub struct Mapping {
    /// Per-container mappings indexed by conceptual container.
    pub containers: IndexMap<app::ContainerId, ContainerMapping>,
}

impl Mapping {
    /// Returns the mapping for the specified conceptual container.
    ///
    /// # Panics
    ///
    /// Panics if the container is not mapped.
    pub fn container(&self, id: app::ContainerId) -> &ContainerMapping {
        self.containers.get(&id).expect("container is not mapped")
    }

    /// Returns the mapping whose store side is `store`, if any.
    pub fn container_for_store(&self, store: db::ContainerId) -> Option<&ContainerMapping> {
        self.containers
            .values()
            .find(|mapping| mapping.store == store)
    }

    /// Returns the mapping of a conceptual extent.
    pub fn extent(&self, extent: Extent) -> Option<&ExtentMapping> {
        let container = extent.conceptual_container()?;
        self.containers.get(&container)?.extent(extent)
    }
}

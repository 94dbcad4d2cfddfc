use super::ExtentMapping;
use crate::schema::{app, db, Extent};

/// Maps one conceptual container onto one store container.
#[derive(Debug, Clone)]
pub struct ContainerMapping {
    pub conceptual: app::ContainerId,

    pub store: db::ContainerId,

    /// One entry per mapped conceptual extent.
    pub extents: Vec<ExtentMapping>,
}

impl ContainerMapping {
    pub fn new(conceptual: app::ContainerId, store: db::ContainerId) -> Self {
        Self {
            conceptual,
            store,
            extents: vec![],
        }
    }

    pub fn extent(&self, extent: Extent) -> Option<&ExtentMapping> {
        self.extents.iter().find(|mapping| mapping.extent == extent)
    }

    /// Returns `true` if any extent carries a user-authored query view.
    pub fn has_user_views(&self) -> bool {
        self.extents
            .iter()
            .any(|mapping| mapping.query_view.is_some() || !mapping.type_views.is_empty())
    }
}

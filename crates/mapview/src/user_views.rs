use crate::view::{GeneratedView, OfTypeKey, Origin, ViewBody, ViewKey};
use mapview_core::{schema::Extent, Schema};

use std::{collections::HashMap, sync::Arc};

/// Query views authored by the user in the mapping.
///
/// Populated once from the schema and read-only afterwards.
#[derive(Debug, Default)]
pub struct UserViews {
    views: HashMap<ViewKey, Arc<GeneratedView>>,
}

impl UserViews {
    pub fn from_schema(schema: &Schema) -> Self {
        let mut views = HashMap::new();

        for container in schema.mapping.containers.values() {
            for mapping in &container.extents {
                if let Some(text) = &mapping.query_view {
                    let key = ViewKey::Extent(mapping.extent);
                    views.insert(key, user_view(schema, key, text));
                }

                let Some(entity_set) = mapping.extent.as_entity_set() else {
                    continue;
                };

                for type_view in &mapping.type_views {
                    let key = ViewKey::OfType(OfTypeKey::new(
                        entity_set,
                        type_view.ty,
                        type_view.include_subtypes,
                    ));
                    views.insert(key, user_view(schema, key, &type_view.text));
                }
            }
        }

        Self { views }
    }

    pub fn get(&self, key: impl Into<ViewKey>) -> Option<&Arc<GeneratedView>> {
        self.views.get(&key.into())
    }

    /// Returns `true` if the user replaced the view of the whole extent.
    pub fn overrides_extent(&self, extent: Extent) -> bool {
        self.views.contains_key(&ViewKey::Extent(extent))
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

fn user_view(schema: &Schema, key: ViewKey, text: &str) -> Arc<GeneratedView> {
    Arc::new(GeneratedView::new(
        schema,
        key,
        ViewBody::Text(text.to_string()),
        Origin::UserDefined,
    ))
}

use super::{
    Association, AssociationEnd, AssociationEndId, AssociationId, AssociationSet,
    AssociationSetId, Container, ContainerId, EntitySet, EntitySetId, Field, FieldId, Model,
    ModelId,
};

use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct Schema {
    pub models: IndexMap<ModelId, Model>,

    pub associations: Vec<Association>,

    pub containers: Vec<Container>,
}

impl Schema {
    /// Get a model by ID
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models.get(&id.into()).expect("invalid model ID")
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    /// Get a field by ID
    pub fn field(&self, id: FieldId) -> &Field {
        self.model(id.model)
            .fields
            .get(id.index)
            .expect("invalid field ID")
    }

    pub fn association(&self, id: AssociationId) -> &Association {
        self.associations.get(id.0).expect("invalid association ID")
    }

    pub fn association_end(&self, id: AssociationEndId) -> &AssociationEnd {
        self.association(id.association).end(id.index)
    }

    pub fn container(&self, id: ContainerId) -> &Container {
        self.containers.get(id.0).expect("invalid container ID")
    }

    pub fn entity_set(&self, id: EntitySetId) -> &EntitySet {
        self.container(id.container)
            .entity_sets
            .get(id.index)
            .expect("invalid entity set ID")
    }

    pub fn association_set(&self, id: AssociationSetId) -> &AssociationSet {
        self.container(id.container)
            .association_sets
            .get(id.index)
            .expect("invalid association set ID")
    }

    /// Iterates `model` followed by each of its base types, nearest first.
    pub fn ancestors(&self, model: ModelId) -> impl Iterator<Item = &Model> + '_ {
        let mut next = Some(model);
        std::iter::from_fn(move || {
            let model = self.model(next?);
            next = model.base();
            Some(model)
        })
    }

    /// The root of `model`'s type hierarchy.
    pub fn root(&self, model: ModelId) -> &Model {
        self.ancestors(model)
            .last()
            .expect("ancestors always yields the model itself")
    }

    /// Returns `true` if `model` is `ancestor` or derives from it.
    pub fn is_assignable(&self, model: ModelId, ancestor: ModelId) -> bool {
        self.ancestors(model).any(|model| model.id == ancestor)
    }

    /// Returns `true` if `model` derives from `ancestor` and is not `ancestor`
    /// itself.
    pub fn is_strict_subtype(&self, model: ModelId, ancestor: ModelId) -> bool {
        model != ancestor && self.is_assignable(model, ancestor)
    }

    /// `model` and every type deriving from it, in declaration order.
    pub fn subtypes(&self, model: ModelId) -> impl Iterator<Item = &Model> + '_ {
        self.models()
            .filter(move |candidate| candidate.is_entity() && self.is_assignable(candidate.id, model))
    }

    /// Key fields of `model`, inherited from the root of its hierarchy.
    pub fn key_fields(&self, model: ModelId) -> &[FieldId] {
        match self.root(model).as_entity() {
            Some(entity) => &entity.primary_key.fields,
            None => &[],
        }
    }

    /// All fields of `model`, including inherited ones. Base fields come
    /// first.
    pub fn all_fields(&self, model: ModelId) -> Vec<&Field> {
        let mut chain: Vec<_> = self.ancestors(model).collect();
        chain.reverse();
        chain.into_iter().flat_map(|model| model.fields.iter()).collect()
    }

    /// Association sets in `container` that bind `entity_set` to one of their
    /// ends, with the index of that end.
    pub fn association_sets_touching(
        &self,
        entity_set: EntitySetId,
    ) -> impl Iterator<Item = (&AssociationSet, usize)> + '_ {
        self.container(entity_set.container)
            .association_sets
            .iter()
            .flat_map(move |set| {
                set.ends
                    .iter()
                    .enumerate()
                    .filter(move |(_, end)| **end == entity_set)
                    .map(move |(index, _)| (set, index))
            })
    }
}

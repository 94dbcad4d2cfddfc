use mapview_core::{
    bail,
    schema::{
        app::{AssociationEndId, EntitySetId, FieldId, FieldTy, ModelId},
        mapping::{ConditionTarget, ParameterMember, ParameterVersion},
        Extent,
    },
    Result, Schema,
};

use indexmap::IndexSet;

/// What the members are needed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Original values are tracked for every member that might be compared
    /// on update, key members included.
    RequiredOriginalValues,

    /// All members are written on update.
    FullUpdate,

    /// Only modified members are written on update.
    PartialUpdate,
}

/// A member of an entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Member {
    Field(FieldId),

    /// A relationship end reached from the entity
    End(AssociationEndId),
}

/// Finds the members of `ty` in `entity_set` that must be read or tracked to
/// detect concurrency conflicts and to bind update parameters.
///
/// Depends only on the mapping.
pub fn interesting_members(
    schema: &Schema,
    entity_set: EntitySetId,
    ty: ModelId,
    scenario: Scenario,
) -> Result<IndexSet<Member>> {
    let element = schema.element_type(entity_set);
    if !schema.app.is_assignable(ty, element) {
        bail!(
            "type `{}` cannot be stored in entity set `{}`",
            schema.app.model(ty).name,
            schema.app.entity_set(entity_set).name
        );
    }

    let mut finder = Finder {
        schema,
        members: IndexSet::new(),
    };

    if scenario == Scenario::RequiredOriginalValues {
        finder.key(ty);
    }

    finder.mapped_ends(entity_set, ty);
    finder.concurrency_tokens(ty);
    finder.conditions(entity_set, ty);
    finder.foreign_keys(entity_set, ty);
    finder.function_parameters(entity_set, ty, scenario);

    Ok(finder.members)
}

struct Finder<'a> {
    schema: &'a Schema,
    members: IndexSet<Member>,
}

impl Finder<'_> {
    fn key(&mut self, ty: ModelId) {
        let schema = self.schema;
        for field in schema.app.key_fields(ty) {
            self.members.insert(Member::Field(*field));
        }
    }

    /// Far ends of the association sets that have their own mapping and that
    /// `ty` takes part in.
    fn mapped_ends(&mut self, entity_set: EntitySetId, ty: ModelId) {
        let schema = self.schema;
        let app = &schema.app;

        for (set, index) in app.association_sets_touching(entity_set) {
            if schema
                .mapping
                .extent(Extent::AssociationSet(set.id))
                .is_none()
            {
                continue;
            }

            let association = app.association(set.association);
            if app.is_assignable(ty, association.end(index).model) {
                self.members
                    .insert(Member::End(association.end_id(1 - index)));
            }
        }
    }

    fn concurrency_tokens(&mut self, ty: ModelId) {
        let schema = self.schema;
        for field in schema.app.all_fields(ty) {
            self.concurrency_field(field.id);
        }
    }

    /// Adds `field` if it is a token, or if it embeds one at any depth.
    /// Returns `true` if anything was added.
    fn concurrency_field(&mut self, field: FieldId) -> bool {
        let schema = self.schema;
        let field = schema.app.field(field);

        let mut interesting = field.is_concurrency_token();

        if let FieldTy::Embedded(embedded) = &field.ty {
            for nested in &schema.app.model(embedded.target).fields {
                interesting |= self.concurrency_field(nested.id);
            }
        }

        if interesting {
            self.members.insert(Member::Field(field.id));
        }

        interesting
    }

    fn conditions(&mut self, entity_set: EntitySetId, ty: ModelId) {
        let schema = self.schema;
        let Some(mapping) = schema.mapping.extent(Extent::EntitySet(entity_set)) else {
            return;
        };

        let ancestors: Vec<_> = schema.app.ancestors(ty).map(|model| model.id).collect();

        for type_mapping in &mapping.type_mappings {
            if !type_mapping.applies_to(ty, &ancestors) {
                continue;
            }

            for fragment in &type_mapping.fragments {
                for condition in &fragment.conditions {
                    if let ConditionTarget::Field(field) = condition.target {
                        self.members.insert(Member::Field(field));
                    }
                }
            }
        }
    }

    fn foreign_keys(&mut self, entity_set: EntitySetId, ty: ModelId) {
        let schema = self.schema;
        let app = &schema.app;

        for (set, index) in app.association_sets_touching(entity_set) {
            let association = app.association(set.association);
            let Some(fk) = association.foreign_key() else {
                continue;
            };

            if index == fk.dependent && app.is_assignable(ty, association.end(index).model) {
                for field in fk.source_fields() {
                    self.members.insert(Member::Field(field));
                }
            }
        }
    }

    fn function_parameters(&mut self, entity_set: EntitySetId, ty: ModelId, scenario: Scenario) {
        let schema = self.schema;
        let Some(mapping) = schema.mapping.extent(Extent::EntitySet(entity_set)) else {
            return;
        };

        for function in mapping.functions.iter().filter(|function| function.ty == ty) {
            for binding in &function.parameters {
                if scenario != Scenario::PartialUpdate
                    && binding.version != ParameterVersion::Original
                {
                    continue;
                }

                match &binding.member {
                    ParameterMember::Field(path) => {
                        if let Some(field) = path.first() {
                            self.members.insert(Member::Field(*field));
                        }
                    }
                    ParameterMember::End { end, .. } => {
                        self.members.insert(Member::End(*end));
                    }
                }
            }
        }
    }
}

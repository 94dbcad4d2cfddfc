use super::{
    app::{FieldTy, ModelId},
    db,
    mapping::{ConditionTarget, ExtentMapping, PropertyMapping},
    Extent, Schema,
};
use crate::{Error, Result};

use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        self.verify_model_names_are_unique()?;
        self.verify_inheritance_is_acyclic()?;
        self.verify_roots_declare_keys()?;
        self.verify_field_targets()?;
        self.verify_foreign_keys()?;
        self.verify_container_names_are_unique()?;
        self.verify_association_sets()?;
        self.verify_store_containers_mapped_once()?;

        for container in self.schema.mapping.containers.values() {
            for extent in &container.extents {
                self.verify_extent_mapping(container.store, extent)?;
            }
        }

        Ok(())
    }

    fn verify_model_names_are_unique(&self) -> Result<()> {
        let mut names = HashSet::new();

        for model in self.schema.app.models() {
            if !names.insert(&model.name) {
                return Err(invalid(format!("duplicate type name `{}`", model.name)));
            }
        }

        Ok(())
    }

    fn verify_inheritance_is_acyclic(&self) -> Result<()> {
        let count = self.schema.app.models.len();

        for model in self.schema.app.models() {
            let mut next = model.base();
            let mut depth = 0;

            while let Some(base) = next {
                if !self.schema.app.models.contains_key(&base) {
                    return Err(invalid(format!(
                        "type `{}` derives from an unknown type",
                        model.name
                    )));
                }

                depth += 1;
                if depth > count {
                    return Err(invalid(format!(
                        "type `{}` has a cyclic inheritance chain",
                        model.name
                    )));
                }

                next = self.schema.app.model(base).base();
            }
        }

        Ok(())
    }

    fn verify_roots_declare_keys(&self) -> Result<()> {
        for model in self.schema.app.models() {
            let Some(entity) = model.as_entity() else {
                continue;
            };

            match entity.base {
                None if entity.primary_key.is_empty() => {
                    return Err(invalid(format!("entity type `{}` has no key", model.name)));
                }
                Some(_) if !entity.primary_key.is_empty() => {
                    return Err(invalid(format!(
                        "derived entity type `{}` declares its own key",
                        model.name
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn verify_field_targets(&self) -> Result<()> {
        for model in self.schema.app.models() {
            for field in &model.fields {
                match &field.ty {
                    FieldTy::Primitive(_) => {}
                    FieldTy::Embedded(embedded) => {
                        let target = self.model(embedded.target)?;
                        if !target.is_embedded() {
                            return Err(invalid(format!(
                                "field `{}.{}` embeds entity type `{}`",
                                model.name, field.name, target.name
                            )));
                        }
                    }
                    FieldTy::Navigation(navigation) => {
                        let Some(association) =
                            self.schema.app.associations.get(navigation.association.0)
                        else {
                            return Err(invalid(format!(
                                "field `{}.{}` navigates an unknown association",
                                model.name, field.name
                            )));
                        };

                        if navigation.from >= association.ends.len() {
                            return Err(invalid(format!(
                                "field `{}.{}` navigates from end {} of `{}`, which has two ends",
                                model.name, field.name, navigation.from, association.name
                            )));
                        }

                        let from = association.end(navigation.from).model;
                        if !self.schema.app.is_assignable(model.id, from) {
                            return Err(invalid(format!(
                                "field `{}.{}` does not belong to end `{}` of `{}`",
                                model.name,
                                field.name,
                                association.end(navigation.from).name,
                                association.name
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn verify_foreign_keys(&self) -> Result<()> {
        for association in &self.schema.app.associations {
            for end in &association.ends {
                if !self.model(end.model)?.is_entity() {
                    return Err(invalid(format!(
                        "association `{}` has an end that is not an entity type",
                        association.name
                    )));
                }
            }

            for fk in &association.constraints {
                let ends = association.ends.len();
                if fk.principal >= ends || fk.dependent >= ends || fk.principal == fk.dependent {
                    return Err(invalid(format!(
                        "foreign key of `{}` must have one principal and one dependent end; \
                         got principal {} and dependent {}",
                        association.name, fk.principal, fk.dependent
                    )));
                }

                let principal = association.end(fk.principal).model;
                let dependent = association.end(fk.dependent).model;
                let key = self.schema.app.key_fields(principal);

                if fk.fields.len() != key.len() {
                    return Err(invalid(format!(
                        "foreign key of `{}` has {} fields but the principal key has {}",
                        association.name,
                        fk.fields.len(),
                        key.len()
                    )));
                }

                let mut targets = HashSet::new();
                for field in &fk.fields {
                    if !targets.insert(field.target) {
                        return Err(invalid(format!(
                            "foreign key of `{}` references the same principal key field twice",
                            association.name
                        )));
                    }

                    if !key.contains(&field.target) {
                        return Err(invalid(format!(
                            "foreign key of `{}` targets a field outside the principal key",
                            association.name
                        )));
                    }

                    if !self.schema.app.is_assignable(dependent, field.source.model) {
                        return Err(invalid(format!(
                            "foreign key field of `{}` is not declared by the dependent type",
                            association.name
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn verify_container_names_are_unique(&self) -> Result<()> {
        let mut names = HashSet::new();

        for container in &self.schema.app.containers {
            if !names.insert(&container.name) {
                return Err(invalid(format!(
                    "duplicate container name `{}`",
                    container.name
                )));
            }

            let mut extent_names = HashSet::new();
            let entity_sets = container.entity_sets.iter().map(|set| &set.name);
            let association_sets = container.association_sets.iter().map(|set| &set.name);

            for name in entity_sets.chain(association_sets) {
                if !extent_names.insert(name) {
                    return Err(invalid(format!(
                        "duplicate extent name `{}.{name}`",
                        container.name
                    )));
                }
            }
        }

        Ok(())
    }

    fn verify_association_sets(&self) -> Result<()> {
        for container in &self.schema.app.containers {
            for set in &container.association_sets {
                let association = self.schema.app.association(set.association);

                for (index, end) in set.ends.iter().enumerate() {
                    if end.container != container.id {
                        return Err(invalid(format!(
                            "association set `{}.{}` binds an entity set of another container",
                            container.name, set.name
                        )));
                    }

                    let element = self.schema.element_type(*end);
                    let end_model = association.end(index).model;

                    if !self.schema.app.is_assignable(end_model, element) {
                        return Err(invalid(format!(
                            "entity set bound to end `{}` of association set `{}.{}` cannot hold `{}`",
                            association.end(index).name,
                            container.name,
                            set.name,
                            self.schema.app.model(end_model).name
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn verify_store_containers_mapped_once(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for mapping in self.schema.mapping.containers.values() {
            if mapping.store.0 >= self.schema.db.containers.len() {
                return Err(invalid("mapping names an unknown store container"));
            }

            if !seen.insert(mapping.store) {
                return Err(invalid(format!(
                    "store container `{}` is mapped more than once",
                    self.schema.db.container(mapping.store).name
                )));
            }
        }

        Ok(())
    }

    fn verify_extent_mapping(&self, store: db::ContainerId, mapping: &ExtentMapping) -> Result<()> {
        let name = match mapping.extent {
            Extent::Table(_) => return Err(invalid("store tables cannot carry a mapping")),
            extent => self.schema.extent_name(extent),
        };

        for fragment in mapping.fragments() {
            let table = self.schema.db.table(fragment.table);
            if table.container != store {
                return Err(invalid(format!(
                    "extent `{name}` is mapped to table `{}` outside its store container",
                    table.name
                )));
            }

            self.verify_properties(&name, fragment.table, &fragment.properties)?;

            for condition in &fragment.conditions {
                if let ConditionTarget::Column(column) = condition.target {
                    if column.table != fragment.table {
                        return Err(invalid(format!(
                            "condition on extent `{name}` names a column of another table"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn verify_properties(
        &self,
        extent: &str,
        table: db::TableId,
        properties: &[PropertyMapping],
    ) -> Result<()> {
        for property in properties {
            match property {
                PropertyMapping::Scalar(scalar) => {
                    if scalar.column.table != table {
                        return Err(invalid(format!(
                            "field `{}` of extent `{extent}` is mapped to a column of another table",
                            self.schema.app.field(scalar.field).name
                        )));
                    }
                }
                PropertyMapping::Embedded(embedded) => {
                    self.verify_properties(extent, table, &embedded.properties)?;
                }
                PropertyMapping::End(end) => {
                    for scalar in &end.properties {
                        if scalar.column.table != table {
                            return Err(invalid(format!(
                                "end of extent `{extent}` is mapped to a column of another table"
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn model(&self, id: ModelId) -> Result<&super::app::Model> {
        self.schema
            .app
            .models
            .get(&id)
            .ok_or_else(|| invalid(format!("unknown type {id:?}")))
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::invalid_schema(message)
}

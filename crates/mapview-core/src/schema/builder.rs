use super::{
    app::{
        self, Association, AssociationEnd, AssociationId, AssociationSet, AssociationSetId,
        ConcurrencyMode, EntityModel, EntitySet, EntitySetId, Field, FieldId, FieldPrimitive,
        FieldTy, ForeignKey, ForeignKeyField, Model, ModelId, ModelKind, Multiplicity, Navigation,
    },
    db::{self, Column, ColumnId, Table, TableId},
    mapping::{ContainerMapping, ExtentMapping},
    Extent, Mapping, Schema,
};
use crate::{stmt, Result};
use std::sync::Arc;

/// Assembles a [`Schema`] piece by piece.
///
/// Every method that declares something returns its id; ids are only
/// meaningful for the builder that issued them. Passing an id from another
/// builder panics. [`Builder::build`] verifies the cross references and
/// freezes the result.
#[derive(Debug, Default)]
pub struct Builder {
    app: app::Schema,
    db: db::Schema,
    mapping: Mapping,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a root entity type.
    pub fn entity(&mut self, name: &str) -> ModelId {
        self.push_model(name, ModelKind::Entity(EntityModel::default()))
    }

    /// Declares an entity type deriving from `base`.
    pub fn derived_entity(&mut self, name: &str, base: ModelId) -> ModelId {
        self.push_model(
            name,
            ModelKind::Entity(EntityModel {
                base: Some(base),
                ..EntityModel::default()
            }),
        )
    }

    /// Declares an embedded (complex) type.
    pub fn embedded(&mut self, name: &str) -> ModelId {
        self.push_model(name, ModelKind::Embedded)
    }

    pub fn mark_abstract(&mut self, model: ModelId) -> &mut Self {
        self.model_mut(model).expect_entity_mut().is_abstract = true;
        self
    }

    pub fn field(&mut self, model: ModelId, name: &str, ty: stmt::Type) -> FieldId {
        self.push_field(model, name, primitive(ty), false, ConcurrencyMode::None)
    }

    pub fn nullable_field(&mut self, model: ModelId, name: &str, ty: stmt::Type) -> FieldId {
        self.push_field(model, name, primitive(ty), true, ConcurrencyMode::None)
    }

    /// Declares a field that is checked for optimistic concurrency.
    pub fn concurrency_field(&mut self, model: ModelId, name: &str, ty: stmt::Type) -> FieldId {
        self.push_field(model, name, primitive(ty), false, ConcurrencyMode::Fixed)
    }

    /// Declares a key field. Only root entity types declare keys.
    pub fn key_field(&mut self, model: ModelId, name: &str, ty: stmt::Type) -> FieldId {
        let field = self.push_field(model, name, primitive(ty), false, ConcurrencyMode::None);
        self.model_mut(model)
            .expect_entity_mut()
            .primary_key
            .fields
            .push(field);
        field
    }

    pub fn embedded_field(&mut self, model: ModelId, name: &str, target: ModelId) -> FieldId {
        self.push_field(
            model,
            name,
            FieldTy::Embedded(app::Embedded { target }),
            false,
            ConcurrencyMode::None,
        )
    }

    /// Declares a navigation field on `model`, which plays end `from` of
    /// `association`.
    pub fn navigation(
        &mut self,
        model: ModelId,
        name: &str,
        association: AssociationId,
        from: usize,
    ) -> FieldId {
        self.push_field(
            model,
            name,
            FieldTy::Navigation(Navigation {
                association,
                from,
                to: 1 - from,
            }),
            false,
            ConcurrencyMode::None,
        )
    }

    /// Declares an association between two entity types. End roles are named
    /// after the types.
    pub fn association(
        &mut self,
        name: &str,
        first: (ModelId, Multiplicity),
        second: (ModelId, Multiplicity),
    ) -> AssociationId {
        let id = AssociationId(self.app.associations.len());

        let first_name = self.app.model(first.0).name.clone();
        let mut second_name = self.app.model(second.0).name.clone();
        if first_name == second_name {
            second_name.push('1');
        }

        self.app.associations.push(Association {
            id,
            name: name.to_string(),
            ends: [
                AssociationEnd {
                    name: first_name,
                    model: first.0,
                    multiplicity: first.1,
                },
                AssociationEnd {
                    name: second_name,
                    model: second.0,
                    multiplicity: second.1,
                },
            ],
            constraints: vec![],
            is_foreign_key: false,
            is_abstract: false,
        });

        id
    }

    /// Makes `association` foreign-key backed. Each pair is
    /// `(dependent field, principal key field)`.
    pub fn foreign_key(
        &mut self,
        association: AssociationId,
        principal: usize,
        fields: &[(FieldId, FieldId)],
    ) -> &mut Self {
        let association = &mut self.app.associations[association.0];
        association.constraints.push(ForeignKey {
            principal,
            dependent: usize::from(principal == 0),
            fields: fields
                .iter()
                .map(|(source, target)| ForeignKeyField {
                    source: *source,
                    target: *target,
                })
                .collect(),
        });
        association.is_foreign_key = true;
        self
    }

    pub fn mark_association_abstract(&mut self, association: AssociationId) -> &mut Self {
        self.app.associations[association.0].is_abstract = true;
        self
    }

    /// Declares a conceptual container.
    pub fn container(&mut self, name: &str) -> app::ContainerId {
        let id = app::ContainerId(self.app.containers.len());
        self.app.containers.push(app::Container {
            id,
            name: name.to_string(),
            entity_sets: vec![],
            association_sets: vec![],
        });
        id
    }

    pub fn entity_set(
        &mut self,
        container: app::ContainerId,
        name: &str,
        model: ModelId,
    ) -> EntitySetId {
        let container = &mut self.app.containers[container.0];
        let id = EntitySetId {
            container: container.id,
            index: container.entity_sets.len(),
        };
        container.entity_sets.push(EntitySet {
            id,
            name: name.to_string(),
            model,
        });
        id
    }

    pub fn association_set(
        &mut self,
        container: app::ContainerId,
        name: &str,
        association: AssociationId,
        ends: [EntitySetId; 2],
    ) -> AssociationSetId {
        let container = &mut self.app.containers[container.0];
        let id = AssociationSetId {
            container: container.id,
            index: container.association_sets.len(),
        };
        container.association_sets.push(AssociationSet {
            id,
            name: name.to_string(),
            association,
            ends,
        });
        id
    }

    /// Declares a store container.
    pub fn store_container(&mut self, name: &str) -> db::ContainerId {
        let id = db::ContainerId(self.db.containers.len());
        self.db.containers.push(db::Container {
            id,
            name: name.to_string(),
            tables: vec![],
        });
        id
    }

    pub fn table(&mut self, container: db::ContainerId, name: &str) -> TableId {
        let id = TableId(self.db.tables.len());
        self.db.tables.push(Table {
            id,
            container,
            name: name.to_string(),
            columns: vec![],
            primary_key: vec![],
        });
        self.db.containers[container.0].tables.push(id);
        id
    }

    pub fn column(&mut self, table: TableId, name: &str, ty: stmt::Type) -> ColumnId {
        self.push_column(table, name, ty, false, false)
    }

    pub fn nullable_column(&mut self, table: TableId, name: &str, ty: stmt::Type) -> ColumnId {
        self.push_column(table, name, ty, true, false)
    }

    pub fn key_column(&mut self, table: TableId, name: &str, ty: stmt::Type) -> ColumnId {
        let column = self.push_column(table, name, ty, false, true);
        self.db.tables[table.0].primary_key.push(column);
        column
    }

    /// Pairs a conceptual container with a store container.
    pub fn map_containers(
        &mut self,
        conceptual: app::ContainerId,
        store: db::ContainerId,
    ) -> &mut Self {
        self.mapping
            .containers
            .insert(conceptual, ContainerMapping::new(conceptual, store));
        self
    }

    /// Returns the mapping of a conceptual extent, creating an empty one on
    /// first use. The extent's container must already be mapped.
    pub fn map_extent(&mut self, extent: impl Into<Extent>) -> &mut ExtentMapping {
        let extent = extent.into();
        let container = extent
            .conceptual_container()
            .expect("only conceptual extents are mapped");
        let mapping = self
            .mapping
            .containers
            .get_mut(&container)
            .expect("container is not mapped");

        let index = match mapping
            .extents
            .iter()
            .position(|mapping| mapping.extent == extent)
        {
            Some(index) => index,
            None => {
                mapping.extents.push(ExtentMapping::new(extent));
                mapping.extents.len() - 1
            }
        };

        &mut mapping.extents[index]
    }

    pub fn build(self) -> Result<Schema> {
        let schema = Schema {
            app: self.app,
            db: Arc::new(self.db),
            mapping: self.mapping,
        };

        schema.verify()?;

        Ok(schema)
    }

    fn push_model(&mut self, name: &str, kind: ModelKind) -> ModelId {
        let id = ModelId(self.app.models.len());
        self.app.models.insert(
            id,
            Model {
                id,
                name: name.to_string(),
                fields: vec![],
                kind,
            },
        );
        id
    }

    fn model_mut(&mut self, model: ModelId) -> &mut Model {
        self.app.models.get_mut(&model).expect("invalid model ID")
    }

    fn push_field(
        &mut self,
        model: ModelId,
        name: &str,
        ty: FieldTy,
        nullable: bool,
        concurrency: ConcurrencyMode,
    ) -> FieldId {
        let model = self.model_mut(model);
        let id = model.id.field(model.fields.len());
        model.fields.push(Field {
            id,
            name: name.to_string(),
            ty,
            nullable,
            concurrency,
        });
        id
    }

    fn push_column(
        &mut self,
        table: TableId,
        name: &str,
        ty: stmt::Type,
        nullable: bool,
        primary_key: bool,
    ) -> ColumnId {
        let table = &mut self.db.tables[table.0];
        let id = ColumnId {
            table: table.id,
            index: table.columns.len(),
        };
        table.columns.push(Column {
            id,
            name: name.to_string(),
            ty,
            nullable,
            primary_key,
        });
        id
    }
}

fn primitive(ty: stmt::Type) -> FieldTy {
    FieldTy::Primitive(FieldPrimitive { ty })
}

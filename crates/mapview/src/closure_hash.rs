//! Structural hash of a container mapping and everything it references.
//!
//! The hash is computed over a canonical encoding rather than any textual
//! form. Elements are identified by name, never by id, and collections whose
//! order carries no meaning are encoded element by element, sorted by their
//! encoded bytes, before being fed to the digest. Query view text is hashed
//! with its whitespace collapsed.
#![allow(clippy::cast_possible_truncation)]

use mapview_core::{
    err,
    schema::{
        app::{self, FieldTy, ModelId, ModelKind},
        db,
        mapping::{
            Condition, ConditionPredicate, ConditionTarget, ContainerMapping, ExtentMapping,
            FunctionMapping,
            ParameterMember, ParameterVersion, PropertyMapping, TypeMapping,
        },
    },
    stmt, Error, Result, Schema,
};

use sha2::{Digest, Sha256};
use std::{collections::BTreeSet, fmt, str::FromStr};

/// SHA-256 closure hash of a container mapping.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClosureHash([u8; 32]);

impl ClosureHash {
    /// Hashes the mapping of `container` together with the types,
    /// associations and tables it references.
    ///
    /// Returns `None` if the container is not mapped.
    pub fn compute(schema: &Schema, container: app::ContainerId) -> Option<Self> {
        let mapping = schema.mapping.containers.get(&container)?;

        let mut encoder = Encoder::new(schema);
        encoder.container_pair(mapping);

        let digest = Sha256::digest(&encoder.out);
        Some(Self(digest.into()))
    }
}

impl fmt::Display for ClosureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for ClosureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClosureHash({self})")
    }
}

impl FromStr for ClosureHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut bytes = [0; 32];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| err!("closure hash must be 64 hex characters; got `{s}`: {e}"))?;

        Ok(Self(bytes))
    }
}

struct Encoder<'a> {
    schema: &'a Schema,
    out: Vec<u8>,
}

impl<'a> Encoder<'a> {
    fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            out: vec![],
        }
    }

    /// Encodes `f` into a fresh buffer sharing this encoder's schema.
    fn nested(&self, f: impl FnOnce(&mut Encoder<'a>)) -> Vec<u8> {
        let mut nested = Encoder::new(self.schema);
        f(&mut nested);
        nested.out
    }

    /// Writes a collection whose order carries no meaning.
    fn unordered<T>(&mut self, items: impl IntoIterator<Item = T>, f: impl Fn(&mut Encoder<'a>, T)) {
        let mut encoded: Vec<Vec<u8>> = items
            .into_iter()
            .map(|item| self.nested(|encoder| f(encoder, item)))
            .collect();
        encoded.sort();

        self.write_u32(encoded.len() as u32);
        for item in encoded {
            self.write_bytes(&item);
        }
    }

    fn container_pair(&mut self, mapping: &ContainerMapping) {
        let schema = self.schema;
        let conceptual = schema.app.container(mapping.conceptual);
        let store = schema.db.container(mapping.store);

        self.write_tag(0x01);
        self.write_str(&conceptual.name);
        self.write_str(&store.name);

        self.write_tag(0x02);
        self.unordered(&conceptual.entity_sets, |e, set| {
            e.write_str(&set.name);
            e.model_name(set.model);
        });

        self.write_tag(0x03);
        self.unordered(&conceptual.association_sets, |e, set| {
            e.write_str(&set.name);
            e.write_str(&schema.app.association(set.association).name);
            for end in set.ends {
                e.write_str(&schema.app.entity_set(end).name);
            }
        });

        let closure = TypeClosure::of(schema, conceptual);

        self.write_tag(0x04);
        self.unordered(&closure.models, |e, model| e.model(*model));

        self.write_tag(0x05);
        self.unordered(&closure.associations, |e, association| {
            e.association(schema.app.association(*association))
        });

        self.write_tag(0x06);
        self.unordered(schema.db.tables_in(mapping.store), |e, table| e.table(table));

        self.write_tag(0x07);
        self.unordered(&mapping.extents, |e, extent| e.extent_mapping(extent));
    }

    fn model(&mut self, model: ModelId) {
        let model = self.schema.app.model(model);
        self.write_str(&model.name);

        match &model.kind {
            ModelKind::Entity(entity) => {
                self.write_tag(0x10);
                self.optional_model(entity.base);
                self.write_bool(entity.is_abstract);

                // Key order is significant.
                self.write_u32(entity.primary_key.fields.len() as u32);
                for field in &entity.primary_key.fields {
                    self.field_name(*field);
                }
            }
            ModelKind::Embedded => self.write_tag(0x11),
        }

        self.unordered(&model.fields, |e, field| e.field(field));
    }

    fn field(&mut self, field: &app::Field) {
        self.write_str(&field.name);
        self.write_bool(field.nullable);
        self.write_bool(field.is_concurrency_token());

        match &field.ty {
            FieldTy::Primitive(primitive) => {
                self.write_tag(0x20);
                self.write_str(primitive.ty.name());
            }
            FieldTy::Embedded(embedded) => {
                self.write_tag(0x21);
                self.model_name(embedded.target);
            }
            FieldTy::Navigation(navigation) => {
                let schema = self.schema;
                self.write_tag(0x22);
                self.write_str(&schema.app.association(navigation.association).name);
                self.write_u32(navigation.from as u32);
            }
        }
    }

    fn association(&mut self, association: &app::Association) {
        self.write_str(&association.name);
        self.write_bool(association.is_foreign_key);
        self.write_bool(association.is_abstract);

        for end in &association.ends {
            self.write_str(&end.name);
            self.model_name(end.model);
            self.write_str(end.multiplicity.name());
        }

        self.unordered(&association.constraints, |e, fk| {
            e.write_u32(fk.principal as u32);
            e.unordered(&fk.fields, |e, field| {
                e.field_name(field.source);
                e.field_name(field.target);
            });
        });
    }

    fn table(&mut self, table: &db::Table) {
        self.write_str(&table.name);
        self.unordered(&table.columns, |e, column| {
            e.write_str(&column.name);
            e.write_str(column.ty.name());
            e.write_bool(column.nullable);
            e.write_bool(column.primary_key);
        });
    }

    fn extent_mapping(&mut self, mapping: &ExtentMapping) {
        let name = self.schema.extent_name(mapping.extent);
        self.write_str(&name);

        match &mapping.query_view {
            Some(text) => {
                self.write_tag(0x30);
                self.write_text(text);
            }
            None => self.write_tag(0x31),
        }

        self.unordered(&mapping.type_views, |e, view| {
            e.model_name(view.ty);
            e.write_bool(view.include_subtypes);
            e.write_text(&view.text);
        });

        self.unordered(&mapping.type_mappings, |e, type_mapping| {
            e.type_mapping(type_mapping)
        });

        self.unordered(&mapping.functions, |e, function| e.function(function));
    }

    fn type_mapping(&mut self, type_mapping: &TypeMapping) {
        self.unordered(&type_mapping.types, |e, ty| e.model_name(*ty));
        self.unordered(&type_mapping.is_of_types, |e, ty| e.model_name(*ty));

        let schema = self.schema;
        self.unordered(&type_mapping.fragments, |e, fragment| {
            e.write_str(&schema.db.table(fragment.table).name);
            e.properties(&fragment.properties);
            e.unordered(&fragment.conditions, |e, condition| e.condition(condition));
        });
    }

    fn properties(&mut self, properties: &[PropertyMapping]) {
        self.unordered(properties, |e, property| match property {
            PropertyMapping::Scalar(scalar) => {
                e.write_tag(0x40);
                e.field_name(scalar.field);
                e.column_name(scalar.column);
            }
            PropertyMapping::Embedded(embedded) => {
                e.write_tag(0x41);
                e.field_name(embedded.field);
                e.properties(&embedded.properties);
            }
            PropertyMapping::End(end) => {
                e.write_tag(0x42);
                e.end_name(end.end);
                e.unordered(&end.properties, |e, scalar| {
                    e.field_name(scalar.field);
                    e.column_name(scalar.column);
                });
            }
        });
    }

    fn condition(&mut self, condition: &Condition) {
        match condition.target {
            ConditionTarget::Field(field) => {
                self.write_tag(0x50);
                self.field_name(field);
            }
            ConditionTarget::Column(column) => {
                self.write_tag(0x51);
                self.column_name(column);
            }
        }

        match &condition.predicate {
            ConditionPredicate::IsNull => self.write_tag(0x52),
            ConditionPredicate::IsNotNull => self.write_tag(0x53),
            ConditionPredicate::Eq(value) => {
                self.write_tag(0x54);
                self.value(value);
            }
        }
    }

    fn function(&mut self, function: &FunctionMapping) {
        self.model_name(function.ty);
        self.write_str(function.kind.name());
        self.write_str(&function.function);

        self.unordered(&function.parameters, |e, binding| {
            e.write_str(&binding.parameter);
            e.write_bool(binding.version == ParameterVersion::Original);

            match &binding.member {
                ParameterMember::Field(path) => {
                    e.write_tag(0x60);
                    e.write_u32(path.len() as u32);
                    for field in path {
                        e.field_name(*field);
                    }
                }
                ParameterMember::End { end, field } => {
                    e.write_tag(0x61);
                    e.end_name(*end);
                    e.field_name(*field);
                }
            }
        });
    }

    fn value(&mut self, value: &stmt::Value) {
        match value {
            stmt::Value::Bool(value) => {
                self.write_tag(0x70);
                self.write_bool(*value);
            }
            stmt::Value::I64(value) => {
                self.write_tag(0x71);
                self.out.extend_from_slice(&value.to_be_bytes());
            }
            stmt::Value::String(value) => {
                self.write_tag(0x72);
                self.write_str(value);
            }
            stmt::Value::Null => self.write_tag(0x73),
        }
    }

    fn model_name(&mut self, model: ModelId) {
        let schema = self.schema;
        self.write_str(&schema.app.model(model).name);
    }

    fn optional_model(&mut self, model: Option<ModelId>) {
        match model {
            Some(model) => {
                self.write_tag(0x01);
                self.model_name(model);
            }
            None => self.write_tag(0x00),
        }
    }

    fn field_name(&mut self, field: app::FieldId) {
        let schema = self.schema;
        self.model_name(field.model);
        self.write_str(&schema.app.field(field).name);
    }

    fn column_name(&mut self, column: db::ColumnId) {
        let schema = self.schema;
        self.write_str(&schema.db.table(column.table).name);
        self.write_str(&schema.db.column(column).name);
    }

    fn end_name(&mut self, end: app::AssociationEndId) {
        let schema = self.schema;
        self.write_str(&schema.app.association(end.association).name);
        self.write_str(&schema.app.association_end(end).name);
    }

    /// Query view text, with runs of whitespace collapsed to one space.
    fn write_text(&mut self, text: &str) {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        self.write_str(&normalized);
    }

    fn write_str(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    fn write_bytes(&mut self, value: &[u8]) {
        self.write_u32(value.len() as u32);
        self.out.extend_from_slice(value);
    }

    fn write_u32(&mut self, value: u32) {
        self.out.extend_from_slice(&value.to_be_bytes());
    }

    fn write_bool(&mut self, value: bool) {
        self.write_tag(u8::from(value));
    }

    fn write_tag(&mut self, tag: u8) {
        self.out.push(tag);
    }
}

/// Types and associations reachable from a container's extents.
struct TypeClosure {
    models: BTreeSet<ModelId>,
    associations: BTreeSet<app::AssociationId>,
}

impl TypeClosure {
    fn of(schema: &Schema, container: &app::Container) -> Self {
        let mut closure = Self {
            models: BTreeSet::new(),
            associations: BTreeSet::new(),
        };

        for set in &container.entity_sets {
            for model in schema.app.subtypes(set.model) {
                closure.add_model(schema, model.id);
            }
        }

        for set in &container.association_sets {
            closure.add_association(schema, set.association);
        }

        closure
    }

    fn add_model(&mut self, schema: &Schema, model: ModelId) {
        if !self.models.insert(model) {
            return;
        }

        let model = schema.app.model(model);

        if let Some(base) = model.base() {
            self.add_model(schema, base);
        }

        for field in &model.fields {
            match &field.ty {
                FieldTy::Primitive(_) => {}
                FieldTy::Embedded(embedded) => self.add_model(schema, embedded.target),
                FieldTy::Navigation(navigation) => {
                    self.add_association(schema, navigation.association)
                }
            }
        }
    }

    fn add_association(&mut self, schema: &Schema, association: app::AssociationId) {
        if !self.associations.insert(association) {
            return;
        }

        for end in &schema.app.association(association).ends {
            self.add_model(schema, end.model);
        }
    }
}

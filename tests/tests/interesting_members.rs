use tests::{fixtures::Orders, *};

use mapview::{Member, Scenario};
use mapview_core::{
    schema::{
        app::{AssociationEndId, EntitySetId, FieldId, ModelId, Multiplicity},
        mapping::{
            Condition, ConditionPredicate, ConditionTarget, EndMapping, Fragment, FunctionKind,
            FunctionMapping, ParameterBinding, ParameterMember, ParameterVersion, PropertyMapping,
            ScalarMapping, TypeMapping,
        },
    },
    stmt::Type,
};

use pretty_assertions::assert_eq;
use std::sync::Arc;

fn members(f: &Orders, entity_set: EntitySetId, ty: ModelId, scenario: Scenario) -> Vec<Member> {
    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary(&f.schema, &generator);

    let members = views.interesting_members(entity_set, ty, scenario).unwrap();
    assert!(generator.ops().is_empty());

    members.iter().copied().collect()
}

#[test]
fn keys_are_only_tracked_for_original_values() {
    let f = Orders::new(Multiplicity::One);

    assert_eq!(
        members(&f, f.orders, f.order, Scenario::RequiredOriginalValues),
        [Member::Field(f.order_id), Member::Field(f.order_version)]
    );
    assert_eq!(
        members(&f, f.orders, f.order, Scenario::FullUpdate),
        [Member::Field(f.order_version)]
    );
}

#[test]
fn foreign_key_fields_of_the_dependent() {
    let f = Orders::new(Multiplicity::One);

    assert_eq!(
        members(&f, f.items, f.item, Scenario::FullUpdate),
        [Member::Field(f.item_order_id)]
    );

    // The principal holds no foreign key.
    assert_eq!(
        members(&f, f.orders, f.order, Scenario::PartialUpdate),
        [Member::Field(f.order_version)]
    );
}

#[test]
fn embedded_concurrency_tokens_bring_their_parent() {
    let mut fields = None;
    let f = Orders::customized(Multiplicity::One, |builder, ids| {
        let audit = builder.embedded("Audit");
        builder.field(audit, "Author", Type::String);
        let stamp = builder.concurrency_field(audit, "Stamp", Type::Binary);
        let order_audit = builder.embedded_field(ids.order, "Audit", audit);
        fields = Some((stamp, order_audit));
    });
    let (stamp, order_audit) = fields.unwrap();

    assert_eq!(
        members(&f, f.orders, f.order, Scenario::FullUpdate),
        [
            Member::Field(f.order_version),
            Member::Field(stamp),
            Member::Field(order_audit),
        ]
    );
}

#[test]
fn condition_fields_are_included() {
    let mut status = None;
    let f = Orders::customized(Multiplicity::One, |builder, ids| {
        let field = builder.nullable_field(ids.item, "Status", Type::String);
        builder.map_extent(ids.items).type_mappings[0].fragments[0]
            .conditions
            .push(Condition {
                target: ConditionTarget::Field(field),
                predicate: ConditionPredicate::IsNotNull,
            });
        status = Some(field);
    });

    assert_eq!(
        members(&f, f.items, f.item, Scenario::FullUpdate),
        [Member::Field(status.unwrap()), Member::Field(f.item_order_id)]
    );
}

#[test]
fn mapped_association_sets_contribute_the_far_end() {
    let mut far_end = None;
    let f = Orders::customized(Multiplicity::One, |builder, ids| {
        let association = builder.association(
            "Order_Favorite",
            (ids.order, Multiplicity::Many),
            (ids.item, Multiplicity::Many),
        );
        let favorites = builder.association_set(
            ids.model,
            "Favorites",
            association,
            [ids.orders, ids.items],
        );

        let table = builder.table(ids.store, "Favorites");
        let order_column = builder.key_column(table, "OrderId", Type::I32);
        let item_column = builder.key_column(table, "ItemId", Type::I32);

        let end = |index, field, column| {
            PropertyMapping::End(EndMapping {
                end: AssociationEndId { association, index },
                properties: vec![ScalarMapping { field, column }],
            })
        };

        builder.map_extent(favorites).type_mappings.push(TypeMapping {
            types: vec![],
            is_of_types: vec![],
            fragments: vec![Fragment::new(table)
                .property(end(0, ids.order_id, order_column))
                .property(end(1, ids.item_id, item_column))],
        });

        far_end = Some(AssociationEndId {
            association,
            index: 1,
        });
    });

    assert_eq!(
        members(&f, f.orders, f.order, Scenario::FullUpdate),
        [Member::End(far_end.unwrap()), Member::Field(f.order_version)]
    );

    // The foreign-key set has no mapping of its own and adds no end.
    assert_eq!(
        members(&f, f.items, f.item, Scenario::FullUpdate),
        [
            Member::End(AssociationEndId {
                association: far_end.unwrap().association,
                index: 0,
            }),
            Member::Field(f.item_order_id),
        ]
    );
}

#[test]
fn function_parameters_depend_on_the_scenario() {
    let mut notes = None;
    let f = Orders::customized(Multiplicity::One, |builder, ids| {
        let field = builder.nullable_field(ids.order, "Notes", Type::String);
        notes = Some(field);

        let binding = |parameter: &str, path: Vec<FieldId>, version| ParameterBinding {
            parameter: parameter.to_string(),
            member: ParameterMember::Field(path),
            version,
        };

        builder.map_extent(ids.orders).functions.push(FunctionMapping {
            ty: ids.order,
            kind: FunctionKind::Update,
            function: "UpdateOrder".into(),
            parameters: vec![
                binding("id", vec![ids.order_id], ParameterVersion::Original),
                binding("notes", vec![field], ParameterVersion::Current),
            ],
        });

        builder.map_extent(ids.items).functions.push(FunctionMapping {
            ty: ids.item,
            kind: FunctionKind::Delete,
            function: "DeleteOrderItem".into(),
            parameters: vec![ParameterBinding {
                parameter: "order_id".into(),
                member: ParameterMember::End {
                    end: AssociationEndId {
                        association: ids.association,
                        index: 0,
                    },
                    field: ids.order_id,
                },
                version: ParameterVersion::Original,
            }],
        });
    });

    assert_eq!(
        members(&f, f.orders, f.order, Scenario::FullUpdate),
        [Member::Field(f.order_version), Member::Field(f.order_id)]
    );
    assert_eq!(
        members(&f, f.orders, f.order, Scenario::PartialUpdate),
        [
            Member::Field(f.order_version),
            Member::Field(f.order_id),
            Member::Field(notes.unwrap()),
        ]
    );
    assert_eq!(
        members(&f, f.items, f.item, Scenario::FullUpdate),
        [
            Member::Field(f.item_order_id),
            Member::End(AssociationEndId {
                association: f.association,
                index: 0,
            }),
        ]
    );
}

#[test]
fn type_outside_the_entity_set_is_rejected() {
    let f = Orders::new(Multiplicity::One);
    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary(&f.schema, &generator);

    let err = views
        .interesting_members(f.orders, f.item, Scenario::FullUpdate)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "type `OrderItem` cannot be stored in entity set `Orders`"
    );
}

#[test]
fn members_are_memoized() {
    let f = Orders::new(Multiplicity::One);
    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary(&f.schema, &generator);

    let first = views
        .interesting_members(f.items, f.item, Scenario::PartialUpdate)
        .unwrap();
    let second = views
        .interesting_members(f.items, f.item, Scenario::PartialUpdate)
        .unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let other = views
        .interesting_members(f.items, f.item, Scenario::FullUpdate)
        .unwrap();
    assert!(!Arc::ptr_eq(&first, &other));
}

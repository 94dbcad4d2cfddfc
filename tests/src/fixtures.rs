//! Schemas shared by the integration tests.

use mapview_core::schema::{
    self,
    app::{self, AssociationId, AssociationSetId, EntitySetId, FieldId, ModelId, Multiplicity},
    db::{self, TableId},
    mapping::{Fragment, TypeMapping},
    Schema,
};
use mapview_core::stmt::Type;

use std::ops::Deref;
use std::sync::Arc;

/// Container `Model` holding `Orders`, `OrderItems` and the foreign-key
/// association set `OrderItems_FK`, mapped onto container `Store`.
///
/// `OrderItem.OrderId` references `Order.Id`. The principal multiplicity is
/// chosen by the test.
#[derive(Debug)]
pub struct Orders {
    pub schema: Arc<Schema>,
    pub ids: OrdersIds,
}

#[derive(Debug, Clone, Copy)]
pub struct OrdersIds {
    pub model: app::ContainerId,
    pub store: db::ContainerId,

    pub order: ModelId,
    pub order_id: FieldId,
    pub order_version: FieldId,

    pub item: ModelId,
    pub item_id: FieldId,
    pub item_order_id: FieldId,

    pub association: AssociationId,

    pub orders: EntitySetId,
    pub items: EntitySetId,
    pub items_fk: AssociationSetId,

    pub orders_table: TableId,
    pub items_table: TableId,
}

impl Orders {
    pub fn new(principal: Multiplicity) -> Self {
        Self::customized(principal, |_, _| {})
    }

    /// Builds the schema, letting `customize` add to it before it is
    /// verified.
    pub fn customized(
        principal: Multiplicity,
        customize: impl FnOnce(&mut schema::Builder, &OrdersIds),
    ) -> Self {
        let mut builder = Schema::builder();

        let order = builder.entity("Order");
        let order_id = builder.key_field(order, "Id", Type::I32);
        builder.field(order, "Customer", Type::String);
        let order_version = builder.concurrency_field(order, "Version", Type::Binary);

        let item = builder.entity("OrderItem");
        let item_id = builder.key_field(item, "Id", Type::I32);
        let item_order_id = if principal.is_optional() {
            builder.nullable_field(item, "OrderId", Type::I32)
        } else {
            builder.field(item, "OrderId", Type::I32)
        };
        builder.field(item, "Quantity", Type::I32);

        let association = builder.association(
            "OrderItem_Order",
            (order, principal),
            (item, Multiplicity::Many),
        );
        builder.foreign_key(association, 0, &[(item_order_id, order_id)]);

        let model = builder.container("Model");
        let orders = builder.entity_set(model, "Orders", order);
        let items = builder.entity_set(model, "OrderItems", item);
        let items_fk = builder.association_set(model, "OrderItems_FK", association, [orders, items]);

        let store = builder.store_container("Store");

        let orders_table = builder.table(store, "Orders");
        let orders_id_column = builder.key_column(orders_table, "Id", Type::I32);
        builder.column(orders_table, "Customer", Type::String);
        builder.column(orders_table, "Version", Type::Binary);

        let items_table = builder.table(store, "OrderItems");
        let items_id_column = builder.key_column(items_table, "Id", Type::I32);
        let items_order_id_column = if principal.is_optional() {
            builder.nullable_column(items_table, "OrderId", Type::I32)
        } else {
            builder.column(items_table, "OrderId", Type::I32)
        };
        builder.column(items_table, "Quantity", Type::I32);

        builder.map_containers(model, store);

        builder.map_extent(orders).type_mappings.push(TypeMapping {
            types: vec![order],
            is_of_types: vec![],
            fragments: vec![Fragment::new(orders_table).scalar(order_id, orders_id_column)],
        });

        builder.map_extent(items).type_mappings.push(TypeMapping {
            types: vec![item],
            is_of_types: vec![],
            fragments: vec![Fragment::new(items_table)
                .scalar(item_id, items_id_column)
                .scalar(item_order_id, items_order_id_column)],
        });

        let ids = OrdersIds {
            model,
            store,
            order,
            order_id,
            order_version,
            item,
            item_id,
            item_order_id,
            association,
            orders,
            items,
            items_fk,
            orders_table,
            items_table,
        };

        customize(&mut builder, &ids);

        Self {
            schema: Arc::new(builder.build().unwrap()),
            ids,
        }
    }
}

impl Deref for Orders {
    type Target = OrdersIds;

    fn deref(&self) -> &Self::Target {
        &self.ids
    }
}

/// Two independent container pairs, `Sales:SalesStore` holding `Orders` and
/// `Staff:StaffStore` holding `People`.
#[derive(Debug)]
pub struct TwoContainers {
    pub schema: Arc<Schema>,
    pub sales: app::ContainerId,
    pub staff: app::ContainerId,
    pub orders: EntitySetId,
    pub people: EntitySetId,
}

impl TwoContainers {
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let order = builder.entity("Order");
        builder.key_field(order, "Id", Type::I32);
        let person = builder.entity("Person");
        builder.key_field(person, "Id", Type::I32);

        let sales = builder.container("Sales");
        let orders = builder.entity_set(sales, "Orders", order);
        let sales_store = builder.store_container("SalesStore");
        let orders_table = builder.table(sales_store, "Orders");
        builder.key_column(orders_table, "Id", Type::I32);
        builder.map_containers(sales, sales_store);

        let staff = builder.container("Staff");
        let people = builder.entity_set(staff, "People", person);
        let staff_store = builder.store_container("StaffStore");
        let people_table = builder.table(staff_store, "People");
        builder.key_column(people_table, "Id", Type::I32);
        builder.map_containers(staff, staff_store);

        Self {
            schema: Arc::new(builder.build().unwrap()),
            sales,
            staff,
            orders,
            people,
        }
    }
}

impl Default for TwoContainers {
    fn default() -> Self {
        Self::new()
    }
}

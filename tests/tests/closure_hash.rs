use tests::{fixtures::Orders, *};

use mapview::ClosureHash;
use mapview_core::{
    schema::{
        app::{ContainerId, Multiplicity},
        mapping::{Fragment, TypeMapping},
    },
    stmt::Type,
    Schema,
};

use pretty_assertions::{assert_eq, assert_ne};
use std::sync::Arc;

/// Container `Catalog` with `Products` and `Vendors`, declared in either
/// order, and an optional user view on `Products`.
fn catalog(
    reversed: bool,
    products_view: Option<&str>,
    vendor_name_column: &str,
) -> (Schema, ContainerId) {
    let mut builder = Schema::builder();

    let product = builder.entity("Product");
    let product_id = builder.key_field(product, "Id", Type::I32);
    let vendor = builder.entity("Vendor");
    let vendor_id = builder.key_field(vendor, "Id", Type::I32);
    let vendor_name = builder.field(vendor, "Name", Type::String);

    let catalog = builder.container("Catalog");
    let (products, vendors) = if reversed {
        let vendors = builder.entity_set(catalog, "Vendors", vendor);
        (builder.entity_set(catalog, "Products", product), vendors)
    } else {
        let products = builder.entity_set(catalog, "Products", product);
        (products, builder.entity_set(catalog, "Vendors", vendor))
    };

    let store = builder.store_container("CatalogStore");
    let (products_table, vendors_table) = if reversed {
        let vendors_table = builder.table(store, "Vendors");
        (builder.table(store, "Products"), vendors_table)
    } else {
        let products_table = builder.table(store, "Products");
        (products_table, builder.table(store, "Vendors"))
    };

    let products_id = builder.key_column(products_table, "Id", Type::I32);
    let vendors_id = builder.key_column(vendors_table, "Id", Type::I32);
    let vendors_name = builder.column(vendors_table, vendor_name_column, Type::String);

    builder.map_containers(catalog, store);

    let vendor_fragment = if reversed {
        Fragment::new(vendors_table)
            .scalar(vendor_name, vendors_name)
            .scalar(vendor_id, vendors_id)
    } else {
        Fragment::new(vendors_table)
            .scalar(vendor_id, vendors_id)
            .scalar(vendor_name, vendors_name)
    };

    builder.map_extent(vendors).type_mappings.push(TypeMapping {
        types: vec![vendor],
        is_of_types: vec![],
        fragments: vec![vendor_fragment],
    });

    let products_mapping = builder.map_extent(products);
    products_mapping.query_view = products_view.map(str::to_string);
    products_mapping.type_mappings.push(TypeMapping {
        types: vec![product],
        is_of_types: vec![],
        fragments: vec![Fragment::new(products_table).scalar(product_id, products_id)],
    });

    (builder.build().unwrap(), catalog)
}

fn hash(reversed: bool, products_view: Option<&str>, vendor_name_column: &str) -> ClosureHash {
    let (schema, catalog) = catalog(reversed, products_view, vendor_name_column);
    ClosureHash::compute(&schema, catalog).unwrap()
}

#[test]
fn identical_mappings_hash_alike() {
    let first = Orders::new(Multiplicity::One);
    let second = Orders::new(Multiplicity::One);

    assert_eq!(
        ClosureHash::compute(&first.schema, first.model).unwrap(),
        ClosureHash::compute(&second.schema, second.model).unwrap()
    );
}

#[test]
fn declaration_order_does_not_matter() {
    assert_eq!(hash(false, None, "Name"), hash(true, None, "Name"));
}

#[test]
fn foreign_key_field_order_does_not_matter() {
    let region_hash = |reversed: bool| {
        let f = Orders::customized(Multiplicity::One, |builder, ids| {
            let region = builder.entity("Region");
            let country = builder.key_field(region, "Country", Type::String);
            let code = builder.key_field(region, "Code", Type::I32);

            let shop = builder.entity("Shop");
            builder.key_field(shop, "Id", Type::I32);
            let region_country = builder.field(shop, "RegionCountry", Type::String);
            let region_code = builder.field(shop, "RegionCode", Type::I32);

            let association = builder.association(
                "Shop_Region",
                (region, Multiplicity::One),
                (shop, Multiplicity::Many),
            );
            let mut fields = [(region_code, code), (region_country, country)];
            if reversed {
                fields.reverse();
            }
            builder.foreign_key(association, 0, &fields);

            let regions = builder.entity_set(ids.model, "Regions", region);
            let shops = builder.entity_set(ids.model, "Shops", shop);
            builder.association_set(ids.model, "Shops_FK", association, [regions, shops]);
        });

        ClosureHash::compute(&f.schema, f.model).unwrap()
    };

    assert_eq!(region_hash(false), region_hash(true));
}

#[test]
fn unmapped_container_has_no_hash() {
    let mut archive = None;
    let f = Orders::customized(Multiplicity::One, |builder, ids| {
        let container = builder.container("Archive");
        builder.entity_set(container, "OldOrders", ids.order);
        archive = Some(container);
    });
    let archive = archive.unwrap();

    assert_eq!(ClosureHash::compute(&f.schema, archive), None);

    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary(&f.schema, &generator);
    assert_eq!(views.closure_hash(archive), None);
}

#[test]
fn view_whitespace_does_not_matter() {
    let compact = hash(
        false,
        Some("SELECT VALUE Product(T.Id) FROM CatalogStore.Products AS T"),
        "Name",
    );
    let spread = hash(
        false,
        Some("SELECT VALUE Product(T.Id)\n    FROM  CatalogStore.Products AS T  "),
        "Name",
    );

    assert_eq!(compact, spread);
}

#[test]
fn view_text_changes_are_detected() {
    let original = hash(
        false,
        Some("SELECT VALUE Product(T.Id) FROM CatalogStore.Products AS T"),
        "Name",
    );
    let changed = hash(
        false,
        Some("SELECT VALUE Product(T.Id) FROM CatalogStore.Vendors AS T"),
        "Name",
    );

    assert_ne!(original, changed);
    assert_ne!(original, hash(false, None, "Name"));
}

#[test]
fn column_bindings_are_detected() {
    assert_ne!(hash(false, None, "Name"), hash(false, None, "DisplayName"));
}

#[test]
fn store_changes_are_detected() {
    let plain = Orders::new(Multiplicity::One);
    let widened = Orders::customized(Multiplicity::One, |builder, ids| {
        builder.column(ids.items_table, "Discount", Type::I32);
    });

    assert_ne!(
        ClosureHash::compute(&plain.schema, plain.model).unwrap(),
        ClosureHash::compute(&widened.schema, widened.model).unwrap()
    );

    // Optional principals change the closure too.
    let optional = Orders::new(Multiplicity::ZeroOrOne);
    assert_ne!(
        ClosureHash::compute(&plain.schema, plain.model).unwrap(),
        ClosureHash::compute(&optional.schema, optional.model).unwrap()
    );
}

#[test]
fn text_form_round_trips() {
    let value = hash(false, None, "Name");
    let text = value.to_string();

    assert_eq!(text.len(), 64);
    assert!(text.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    assert_eq!(text.parse::<ClosureHash>().unwrap(), value);
    assert_eq!(format!("{value:?}"), format!("ClosureHash({text})"));
}

#[test]
fn malformed_text_is_rejected() {
    assert!("".parse::<ClosureHash>().is_err());
    assert!("abc".parse::<ClosureHash>().is_err());
    assert!("zz".repeat(32).parse::<ClosureHash>().is_err());
    assert!("+0".repeat(32).parse::<ClosureHash>().is_err());
    assert!("-0".repeat(32).parse::<ClosureHash>().is_err());

    let err = "0".repeat(63).parse::<ClosureHash>().unwrap_err();
    assert!(err.to_string().contains("64 hex characters"), "{err}");
}

#[test]
fn dictionary_memoizes_the_live_hash() {
    let f = Orders::new(Multiplicity::One);
    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary(&f.schema, &generator);

    let expected = ClosureHash::compute(&f.schema, f.model);
    assert!(expected.is_some());
    assert_eq!(views.closure_hash(f.model), expected);
    assert_eq!(views.closure_hash(f.model), expected);
    assert!(generator.ops().is_empty());
}

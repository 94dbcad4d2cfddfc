use tests::{fixtures::Orders, *};

use mapview::{
    assembly::{FixedViewAssemblySource, JsonViewAssembly},
    AssemblyCache, Config, Mode, Origin, PreGeneratedViews, ViewAssembly,
};
use mapview_core::{schema::app::Multiplicity, stmt::Type};

use pretty_assertions::assert_eq;
use std::sync::Arc;

/// Views of `f` exported by a dictionary that generated them at runtime.
fn exported(f: &Orders) -> PreGeneratedViews {
    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary_with(
        &f.schema,
        &generator,
        Arc::new(AssemblyCache::empty()),
        Config {
            pregenerated_views: false,
            ..Config::default()
        },
    );

    views.export_views(f.model).unwrap()
}

fn shipped(name: &str, artifact: &PreGeneratedViews) -> Arc<dyn ViewAssembly> {
    Arc::new(JsonViewAssembly::new(name).artifact(artifact).unwrap())
}

fn cache(assemblies: Vec<Arc<dyn ViewAssembly>>) -> Arc<AssemblyCache> {
    Arc::new(AssemblyCache::new(FixedViewAssemblySource::new(assemblies)))
}

#[test]
fn exported_views_cover_every_extent_of_the_pair() {
    let f = Orders::new(Multiplicity::One);
    let artifact = exported(&f);

    assert_eq!(artifact.container_pair, "Model:Store");
    assert_eq!(artifact.hash.len(), 64);
    assert_eq!(
        artifact.views.keys().collect::<Vec<_>>(),
        [
            "Model.Orders",
            "Model.OrderItems",
            "Model.OrderItems_FK",
            "Store.Orders",
            "Store.OrderItems",
        ]
    );
    assert_eq!(artifact.views["Model.Orders"], "runtime view of Model.Orders");
}

#[test]
fn adopts_matching_artifact_without_generating() {
    let f = Orders::new(Multiplicity::One);
    let artifact = exported(&f);

    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary_with(
        &f.schema,
        &generator,
        cache(vec![shipped("app", &artifact)]),
        Config::default(),
    );

    let orders = views.get_view(f.orders).unwrap();
    assert_eq!(orders.origin(), Origin::PreGenerated);
    assert_eq!(orders.text(), "runtime view of Model.Orders");
    assert!(orders.query().is_none());

    let table = views.get_view(f.items_table).unwrap();
    assert_eq!(table.origin(), Origin::PreGenerated);

    // Foreign-key sets are still synthesized.
    let fk = views.get_view(f.items_fk).unwrap();
    assert_eq!(fk.origin(), Origin::ForeignKey);

    assert!(generator.ops().is_empty());
    assert_eq!(views.mode(), Mode::GeneratedViews);
}

#[test]
fn artifact_for_a_different_mapping_is_rejected() {
    let stale = Orders::customized(Multiplicity::One, |builder, ids| {
        builder.column(ids.items_table, "Discount", Type::I32);
    });
    let artifact = exported(&stale);

    let f = Orders::new(Multiplicity::One);
    assert_eq!(artifact.container_pair, f.schema.container_pair_name(f.model));

    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary_with(
        &f.schema,
        &generator,
        cache(vec![shipped("app", &artifact)]),
        Config::default(),
    );

    let err = views.get_view(f.orders).unwrap_err();
    assert!(err.is_mapping());
    assert!(err.to_string().contains("regenerate the views"), "{err}");
    assert!(err.to_string().contains(&artifact.hash), "{err}");

    // Every extent of the pair shares the failure.
    let other = views.get_view(f.items).unwrap_err();
    assert!(err.ptr_eq(&other));

    assert!(generator.ops().is_empty());
}

#[test]
fn malformed_artifact_falls_back_to_runtime_generation() {
    let f = Orders::new(Multiplicity::One);
    let assembly: Arc<dyn ViewAssembly> =
        Arc::new(JsonViewAssembly::new("garbled").document("{ \"container_pair\": "));

    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary_with(&f.schema, &generator, cache(vec![assembly]), Config::default());

    let view = views.get_view(f.orders).unwrap();
    assert_eq!(view.origin(), Origin::Runtime);
    assert_eq!(views.mode(), Mode::RuntimeGeneration);
    assert_eq!(generator.container_calls(), 1);
}

#[test]
fn unloadable_assembly_is_skipped() {
    let f = Orders::new(Multiplicity::One);
    let artifact = exported(&f);
    let broken: Arc<dyn ViewAssembly> = Arc::new(BrokenAssembly("plugins"));

    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary_with(
        &f.schema,
        &generator,
        cache(vec![broken, shipped("app", &artifact)]),
        Config::default(),
    );

    let view = views.get_view(f.orders).unwrap();
    assert_eq!(view.origin(), Origin::PreGenerated);
    assert!(generator.ops().is_empty());
}

#[test]
fn artifact_naming_an_unknown_extent_is_skipped() {
    let f = Orders::new(Multiplicity::One);
    let mut artifact = exported(&f);
    artifact
        .views
        .insert("Model.Refunds".into(), "runtime view of Model.Refunds".into());

    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary_with(
        &f.schema,
        &generator,
        cache(vec![shipped("app", &artifact)]),
        Config::default(),
    );

    let view = views.get_view(f.orders).unwrap();
    assert_eq!(view.origin(), Origin::Runtime);
    assert_eq!(views.mode(), Mode::RuntimeGeneration);
}

#[test]
fn artifact_with_malformed_hash_is_skipped() {
    let f = Orders::new(Multiplicity::One);
    let mut artifact = exported(&f);
    artifact.hash = "not-a-hash".into();

    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary_with(
        &f.schema,
        &generator,
        cache(vec![shipped("app", &artifact)]),
        Config::default(),
    );

    let view = views.get_view(f.orders).unwrap();
    assert_eq!(view.origin(), Origin::Runtime);
    assert_eq!(generator.container_calls(), 1);
}

#[test]
fn extent_in_two_artifacts_is_a_mapping_error() {
    let f = Orders::new(Multiplicity::One);
    let artifact = exported(&f);

    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary_with(
        &f.schema,
        &generator,
        cache(vec![shipped("app", &artifact), shipped("copy", &artifact)]),
        Config::default(),
    );

    let err = views.get_view(f.orders).unwrap_err();
    assert!(err.is_mapping());
    assert_eq!(
        err.to_string(),
        "mapping error: extent `Model.Orders` has views in more than one pre-generated artifact"
    );
    assert!(generator.ops().is_empty());
}

#[test]
fn views_split_across_artifacts_are_merged() {
    let f = Orders::new(Multiplicity::One);
    let full = exported(&f);

    let (first, second): (Vec<_>, Vec<_>) = full
        .views
        .iter()
        .map(|(name, text)| (name.clone(), text.clone()))
        .partition(|(name, _)| name.starts_with("Model."));

    let part = |views: Vec<(String, String)>| PreGeneratedViews {
        container_pair: full.container_pair.clone(),
        hash: full.hash.clone(),
        views: views.into_iter().collect(),
    };

    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary_with(
        &f.schema,
        &generator,
        cache(vec![
            shipped("conceptual", &part(first)),
            shipped("store", &part(second)),
        ]),
        Config::default(),
    );

    assert_eq!(views.get_view(f.orders).unwrap().origin(), Origin::PreGenerated);
    assert_eq!(views.get_view(f.orders_table).unwrap().origin(), Origin::PreGenerated);
    assert!(generator.ops().is_empty());
}

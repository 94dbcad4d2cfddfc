use tests::{
    fixtures::{Orders, TwoContainers},
    *,
};

use mapview::{
    assembly::{FixedViewAssemblySource, JsonViewAssembly},
    AssemblyCache, Config, Mode, PreGeneratedViews, ViewAssembly, ViewAssemblySource,
};
use mapview_core::schema::app::Multiplicity;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

/// An assembly carrying views for some other container pair only.
fn unrelated_assembly() -> Arc<CountingAssembly> {
    let artifact = PreGeneratedViews {
        container_pair: "Elsewhere:ElsewhereStore".into(),
        hash: "00".repeat(32),
        views: Default::default(),
    };

    CountingAssembly::new(JsonViewAssembly::new("unrelated").artifact(&artifact).unwrap())
}

fn cache_over(assembly: Arc<CountingAssembly>) -> Arc<AssemblyCache> {
    let assembly: Arc<dyn ViewAssembly> = assembly;
    let source = FixedViewAssemblySource::new(vec![assembly]);
    Arc::new(AssemblyCache::new(source))
}

#[test]
fn switches_to_runtime_generation_once_under_concurrent_first_access() {
    const THREADS: usize = 12;

    let f = Orders::new(Multiplicity::One);
    let assembly = unrelated_assembly();
    let generator = Arc::new(LoggingGenerator::new().delay(Duration::from_millis(30)));
    let views = Arc::new(dictionary_with(
        &f.schema,
        &generator,
        cache_over(assembly.clone()),
        Config::default(),
    ));

    assert_eq!(views.mode(), Mode::GeneratedViews);

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let views = views.clone();
            let barrier = barrier.clone();
            let extent = if i % 2 == 0 { f.orders } else { f.items };

            thread::spawn(move || {
                barrier.wait();
                views.get_view(extent).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(views.mode(), Mode::RuntimeGeneration);
    assert_eq!(assembly.loads(), 1);
    assert_eq!(generator.container_calls(), 1);
}

#[test]
fn later_containers_skip_the_assembly_scan() {
    let f = TwoContainers::new();
    let assembly = unrelated_assembly();
    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary_with(
        &f.schema,
        &generator,
        cache_over(assembly.clone()),
        Config::default(),
    );

    views.get_view(f.orders).unwrap();
    assert_eq!(views.mode(), Mode::RuntimeGeneration);
    assert_eq!(assembly.loads(), 1);

    views.get_view(f.people).unwrap();
    assert_eq!(assembly.loads(), 1);
    assert_eq!(generator.container_calls(), 2);
}

#[test]
fn disabling_pregenerated_views_starts_in_runtime_mode() {
    let f = Orders::new(Multiplicity::One);
    let assembly = unrelated_assembly();
    let generator = Arc::new(LoggingGenerator::new());
    let views = dictionary_with(
        &f.schema,
        &generator,
        cache_over(assembly.clone()),
        Config {
            pregenerated_views: false,
            ..Config::default()
        },
    );

    assert_eq!(views.mode(), Mode::RuntimeGeneration);
    views.get_view(f.orders).unwrap();
    assert_eq!(assembly.loads(), 0);
}

#[derive(Debug, Default)]
struct CountingSource {
    scans: Arc<AtomicUsize>,
}

impl ViewAssemblySource for CountingSource {
    fn candidates(&self) -> Vec<Arc<dyn ViewAssembly>> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        let assembly: Arc<dyn ViewAssembly> = unrelated_assembly();
        vec![assembly]
    }
}

#[test]
fn assembly_scan_is_shared_until_cleared() {
    let f = Orders::new(Multiplicity::One);
    let source = CountingSource::default();
    let scans = source.scans.clone();
    let cache = Arc::new(AssemblyCache::new(source));
    let generator = Arc::new(LoggingGenerator::new());

    let first = dictionary_with(&f.schema, &generator, cache.clone(), Config::default());
    first.get_view(f.orders).unwrap();

    let second = dictionary_with(&f.schema, &generator, cache.clone(), Config::default());
    second.get_view(f.orders).unwrap();

    assert_eq!(scans.load(Ordering::SeqCst), 1);

    second.clear_cache();

    // Resolved views survive the clear.
    let before = first.get_view(f.orders).unwrap();
    assert!(Arc::ptr_eq(&before, &first.get_view(f.orders).unwrap()));

    let third = dictionary_with(&f.schema, &generator, cache, Config::default());
    third.get_view(f.orders).unwrap();

    assert_eq!(scans.load(Ordering::SeqCst), 2);
}

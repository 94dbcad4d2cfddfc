use tests::{fixtures::Orders, *};

use mapview_core::schema::{app::Multiplicity, Extent};

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: usize = 16;

#[test]
fn cold_cache_generates_once_for_concurrent_callers() {
    let f = Orders::new(Multiplicity::One);
    let generator = Arc::new(LoggingGenerator::new().delay(Duration::from_millis(50)));
    let views = Arc::new(dictionary(&f.schema, &generator));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let views = views.clone();
            let barrier = barrier.clone();
            let orders = f.orders;

            thread::spawn(move || {
                barrier.wait();
                views.get_view(orders).unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(generator.container_calls(), 1);
    for view in &results {
        assert!(Arc::ptr_eq(view, &results[0]));
    }
}

#[test]
fn concurrent_callers_for_different_extents_share_the_container() {
    let f = Orders::new(Multiplicity::One);
    let generator = Arc::new(LoggingGenerator::new().delay(Duration::from_millis(50)));
    let views = Arc::new(dictionary(&f.schema, &generator));
    let barrier = Arc::new(Barrier::new(THREADS));

    let extents: Vec<Extent> = vec![
        f.orders.into(),
        f.items.into(),
        f.orders_table.into(),
        f.items_table.into(),
    ];

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let views = views.clone();
            let barrier = barrier.clone();
            let extent = extents[i % extents.len()];

            thread::spawn(move || {
                barrier.wait();
                (extent, views.get_view(extent).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (extent, view) = handle.join().unwrap();
        assert!(Arc::ptr_eq(&view, &views.get_view(extent).unwrap()));
    }

    assert_eq!(generator.container_calls(), 1);
}

#[test]
fn concurrent_type_restricted_lookups_generate_once() {
    let f = Orders::new(Multiplicity::One);
    let generator = Arc::new(LoggingGenerator::new().delay(Duration::from_millis(20)));
    let views = Arc::new(dictionary(&f.schema, &generator));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let views = views.clone();
            let barrier = barrier.clone();
            let (items, item) = (f.items, f.item);

            thread::spawn(move || {
                barrier.wait();
                views.get_view_of_type(items, item, false).unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(generator.of_type_calls(), 1);
    for view in &results {
        assert!(Arc::ptr_eq(view, &results[0]));
    }
}

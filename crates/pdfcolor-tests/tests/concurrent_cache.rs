//! Concurrent resolution against one document cache
//!
//! Many threads resolving the same descriptor must all receive the one
//! instance, built exactly once, whichever thread built it.

use pdfcolor_core::{
    ColorModel, ColorSpaceResolver, FunctionFactory, Object, ResolveOptions, StandardFunctions,
    TransferFunction,
};
use pdfcolor_tests::fixtures::{d65_white, indexed, lab, resources, separation};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

/// Standard tint transforms, slowed down and counted
#[derive(Default)]
struct CountingFunctions {
    builds: AtomicUsize,
}

impl FunctionFactory<Object> for CountingFunctions {
    fn build(&self, descriptor: &Object) -> pdfcolor_core::Result<Arc<dyn TransferFunction>> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(100));
        FunctionFactory::<Object>::build(&StandardFunctions, descriptor)
    }
}

fn assert_all_same(models: &[Arc<ColorModel>]) {
    let first = &models[0];
    for model in models {
        assert!(Arc::ptr_eq(first, model));
    }
}

#[test]
fn test_parallel_resolve_publishes_one_instance() {
    let resolver = ColorSpaceResolver::new();
    let desc = indexed(lab(d65_white(), None), 255, vec![128; 256 * 3]);

    let models: Vec<Arc<ColorModel>> = (0..256)
        .into_par_iter()
        .map(|_| resolver.resolve(&desc, None).unwrap().unwrap())
        .collect();

    assert_all_same(&models);
    // The Indexed space and its Lab base
    assert_eq!(resolver.cache().len(), 2);
}

#[test]
fn test_parallel_named_lookups() {
    let resolver = ColorSpaceResolver::new();
    let res = resources(vec![
        ("Spot0", separation("Gold", [0.0, 0.2, 0.8, 0.1])),
        ("Spot1", separation("Silver", [0.0, 0.0, 0.0, 0.3])),
    ]);
    let names = [Object::name("Spot0"), Object::name("Spot1")];

    let models: Vec<(usize, Arc<ColorModel>)> = (0..512)
        .into_par_iter()
        .map(|i| {
            let which = i % 2;
            let model = resolver.resolve(&names[which], Some(&res)).unwrap().unwrap();
            (which, model)
        })
        .collect();

    for which in 0..2 {
        let group: Vec<_> = models
            .iter()
            .filter(|(w, _)| *w == which)
            .map(|(_, m)| Arc::clone(m))
            .collect();
        assert_all_same(&group);
    }
    assert_eq!(resolver.cache().len(), 2);
}

#[test]
fn test_parallel_conversion_is_pure() {
    let resolver = ColorSpaceResolver::new();
    let model = resolver
        .resolve(&separation("Gold", [0.0, 0.2, 0.8, 0.1]), None)
        .unwrap()
        .unwrap();

    let expected: Vec<_> = (0..=100)
        .map(|i| model.to_rgb(&[i as f32 / 100.0]).unwrap())
        .collect();
    let parallel: Vec<_> = (0..=100)
        .into_par_iter()
        .map(|i| model.to_rgb(&[i as f32 / 100.0]).unwrap())
        .collect();

    assert_eq!(expected, parallel);
}

#[test]
fn test_racing_threads_build_once() {
    let resolver =
        &ColorSpaceResolver::with_functions(ResolveOptions::default(), CountingFunctions::default());
    let desc = &separation("Gold", [0.0, 0.2, 0.8, 0.1]);
    let barrier = &Barrier::new(4);

    let models: Vec<Arc<ColorModel>> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(move || {
                    barrier.wait();
                    resolver.resolve(desc, None).unwrap().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_all_same(&models);
    assert_eq!(resolver.functions().builds.load(Ordering::SeqCst), 1);
    assert_eq!(resolver.cache().len(), 1);
}

#[test]
fn test_failed_build_is_retried_by_waiters() {
    // Every attempt fails, so each thread must get its own error rather than
    // blocking on a build that never publishes
    let resolver =
        &ColorSpaceResolver::with_functions(ResolveOptions::default(), CountingFunctions::default());
    let desc = &Object::array(vec![
        Object::name("Separation"),
        Object::name("Gold"),
        Object::name("DeviceCMYK"),
        Object::name("NotAFunction"),
    ]);
    let barrier = &Barrier::new(3);

    thread::scope(|s| {
        for _ in 0..3 {
            s.spawn(move || {
                barrier.wait();
                assert!(resolver.resolve(desc, None).unwrap_err().is_parse_error());
            });
        }
    });

    assert_eq!(resolver.functions().builds.load(Ordering::SeqCst), 3);
    assert!(resolver.cache().is_empty());
}

#[test]
fn test_crossed_references_fail_without_deadlock() {
    // CS0 -> CS1 -> CS0, entered from both ends at once
    let cs = |base: &str| {
        Object::array(vec![
            Object::name("Indexed"),
            Object::name(base),
            Object::int(0),
            Object::string(vec![0]),
        ])
    };
    let res = &resources(vec![("CS0", cs("CS1")), ("CS1", cs("CS0"))]);
    let resolver = &ColorSpaceResolver::new();
    let barrier = &Barrier::new(2);

    thread::scope(|s| {
        for name in ["CS0", "CS1"] {
            s.spawn(move || {
                barrier.wait();
                let err = resolver.resolve(&Object::name(name), Some(res)).unwrap_err();
                assert!(err.is_parse_error(), "{}", err);
            });
        }
    });
    assert!(resolver.cache().is_empty());
}

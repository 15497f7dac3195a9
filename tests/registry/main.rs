//! Integration tests for Layer 1: Registry
//!
//! Tests the process-wide singleton registry. Every test uses its own types
//! because the registry is shared by all tests in this binary.

use gym_foundation::ErrorKind;
use gym_registry::{
    SingletonRegistry, global, instance_of, instance_of_default, is_initialized, register,
    register_default,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn global_instance_is_shared() {
    struct Clock {
        epoch: u64,
    }

    register(|| Ok::<_, std::io::Error>(Clock { epoch: 1_700_000_000 }));

    let a = instance_of::<Clock>().unwrap();
    let b = global().instance_of::<Clock>().unwrap();
    assert_eq!(a.epoch, 1_700_000_000);
    assert!(Arc::ptr_eq(&a, &b));
    assert!(is_initialized::<Clock>());
}

#[test]
fn global_race_constructs_once() {
    const THREADS: usize = 32;
    static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

    struct Catalog {
        entries: Vec<String>,
    }

    register(|| {
        CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        Ok::<_, std::io::Error>(Catalog {
            entries: vec!["a".into(), "b".into()],
        })
    });

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                instance_of::<Catalog>().unwrap()
            })
        })
        .collect();
    let instances: Vec<Arc<Catalog>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst), 1);
    assert_eq!(instances[0].entries.len(), 2);
    assert!(instances.iter().all(|i| Arc::ptr_eq(i, &instances[0])));
}

#[test]
fn unregistered_type_fails() {
    #[derive(Debug)]
    struct Orphan;

    let err = instance_of::<Orphan>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingConstructorCapability(_)));
    assert!(err.to_string().contains("Orphan"));
}

#[test]
fn default_types_need_no_registration() {
    #[derive(Default)]
    struct Cache {
        entries: HashMap<String, String>,
    }

    let cache = instance_of_default::<Cache>().unwrap();
    assert!(cache.entries.is_empty());
    assert!(Arc::ptr_eq(&cache, &instance_of::<Cache>().unwrap()));
}

#[test]
fn register_default_globally() {
    #[derive(Default)]
    struct Stats {
        hits: AtomicUsize,
    }

    register_default::<Stats>();
    instance_of::<Stats>().unwrap().hits.fetch_add(1, Ordering::SeqCst);
    instance_of::<Stats>().unwrap().hits.fetch_add(1, Ordering::SeqCst);
    assert_eq!(instance_of::<Stats>().unwrap().hits.load(Ordering::SeqCst), 2);
}

#[test]
fn construction_error_then_success() {
    #[derive(Debug)]
    struct Connection {
        attempt: usize,
    }

    let registry = SingletonRegistry::new();
    let attempts = Arc::new(AtomicUsize::new(0));
    {
        let attempts = Arc::clone(&attempts);
        registry.register(move || {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt < 3 {
                Err(format!("refused on attempt {attempt}"))
            } else {
                Ok(Connection { attempt })
            }
        });
    }

    for expected in ["refused on attempt 1", "refused on attempt 2"] {
        let err = registry.instance_of::<Connection>().unwrap_err();
        match err.kind {
            ErrorKind::ConstructionFailed { cause, .. } => assert_eq!(cause.to_string(), expected),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(registry.instance_of::<Connection>().unwrap().attempt, 3);
    assert_eq!(registry.instance_of::<Connection>().unwrap().attempt, 3);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[test]
fn registries_are_isolated() {
    struct Tenant(&'static str);

    let left = SingletonRegistry::new().with_constructor(|| Ok::<_, std::io::Error>(Tenant("left")));
    let right =
        SingletonRegistry::new().with_constructor(|| Ok::<_, std::io::Error>(Tenant("right")));

    assert_eq!(left.instance_of::<Tenant>().unwrap().0, "left");
    assert_eq!(right.instance_of::<Tenant>().unwrap().0, "right");
    assert!(!is_initialized::<Tenant>());
}

#[test]
fn self_request_returns_error() {
    #[derive(Debug)]
    struct Loopback;

    let registry = Arc::new(SingletonRegistry::new());
    let inner = Arc::clone(&registry);
    registry.register(move || inner.instance_of::<Loopback>().map(|_| Loopback));

    let err = registry.instance_of::<Loopback>().unwrap_err();
    match err.kind {
        ErrorKind::ConstructionFailed { cause, .. } => {
            assert!(cause.to_string().contains("was requested while it was being constructed"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!registry.is_initialized::<Loopback>());
}

mod common;

use common::{InMemoryProjectCache, module, pom, reader};
use pomscope_core::WorkspaceReader;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::time::{Duration, Instant};

#[test]
fn test_concurrent_additions_and_queries() {
    let cache = InMemoryProjectCache::new();
    let files: Vec<PathBuf> = (0..100)
        .map(|i| PathBuf::from(format!("/ws/module-{i}/pom.xml")))
        .collect();
    for (i, file) in files.iter().enumerate() {
        cache.parsable(file, module(&format!("module-{i}"), "1.0", file));
    }
    let reader = Arc::new(reader(&cache));

    let writers: Vec<_> = files
        .chunks(25)
        .map(|chunk| {
            let reader = Arc::clone(&reader);
            let chunk = chunk.to_vec();
            std::thread::spawn(move || {
                for file in chunk {
                    assert_eq!(reader.add_to_workspace([file]), 1);
                }
            })
        })
        .collect();
    let queries: Vec<_> = (0..4)
        .map(|t| {
            let reader = Arc::clone(&reader);
            std::thread::spawn(move || {
                for i in (t..100).step_by(4) {
                    // Either answer is fine while population is running.
                    let _ = reader.resolve_file(&pom(&format!("module-{i}"), "1.0"));
                    let _ = reader.resolve_versions(&pom(&format!("module-{i}"), "1.0"));
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(queries) {
        handle.join().unwrap();
    }
    assert!(reader.await_population(Duration::from_secs(10)).is_drained());

    assert_eq!(reader.index().len(), 100);
    for (i, file) in files.iter().enumerate() {
        assert_eq!(
            reader.resolve_file(&pom(&format!("module-{i}"), "1.0")),
            Some(file.clone())
        );
    }
}

#[test]
fn test_nested_lookup_during_population_does_not_deadlock() {
    let app = PathBuf::from("/ws/app/pom.xml");
    let lib = PathBuf::from("/ws/lib/pom.xml");
    let cache = InMemoryProjectCache::new();
    cache.parsable(&app, module("app", "1.0", &app));
    cache.parsable(&lib, module("lib", "1.0", &lib));

    let nested = Arc::new(Mutex::new(Vec::new()));
    {
        let nested = Arc::clone(&nested);
        cache.on_snapshot(move |file, lookup| {
            if file.ends_with("app/pom.xml") {
                // Sibling that is queued after this file.
                nested.lock().unwrap().push(lookup.find_artifact(&pom("lib", "1.0")));
            }
        });
    }
    let reader = reader(&cache);

    let started = Instant::now();
    reader.add_to_workspace([&app, &lib]);
    assert!(reader.await_population(Duration::from_secs(2)).is_drained());
    assert!(started.elapsed() < Duration::from_secs(2));

    assert_eq!(*nested.lock().unwrap(), vec![None]);
    assert_eq!(reader.resolve_file(&pom("lib", "1.0")), Some(lib));
}

#[test]
fn test_nested_lookup_sees_earlier_population() {
    let app = PathBuf::from("/ws/app/pom.xml");
    let lib = PathBuf::from("/ws/lib/pom.xml");
    let cache = InMemoryProjectCache::new();
    cache.parsable(&app, module("app", "1.0", &app));
    cache.parsable(&lib, module("lib", "1.0", &lib));

    let nested = Arc::new(Mutex::new(None));
    {
        let nested = Arc::clone(&nested);
        cache.on_snapshot(move |file, lookup| {
            if file.ends_with("app/pom.xml") {
                *nested.lock().unwrap() = Some((
                    lookup.find_artifact(&pom("lib", "1.0")),
                    lookup.find_versions(&pom("lib", "0")),
                ));
            }
        });
    }
    let reader = reader(&cache);

    reader.add_to_workspace([&lib, &app]);
    assert!(reader.await_population(Duration::from_secs(2)).is_drained());

    assert_eq!(
        *nested.lock().unwrap(),
        Some((Some(lib), vec!["1.0".to_string()]))
    );
}

#[test]
fn test_reader_queried_from_inside_population_does_not_wait() {
    let app = PathBuf::from("/ws/app/pom.xml");
    let lib = PathBuf::from("/ws/lib/pom.xml");
    let cache = InMemoryProjectCache::new();
    cache.parsable(&app, module("app", "1.0", &app));
    cache.parsable(&lib, module("lib", "1.0", &lib));

    // A cache that holds on to the reader instead of using the lookup it
    // is handed.
    let slot: Arc<OnceLock<Weak<WorkspaceReader>>> = Arc::new(OnceLock::new());
    let nested = Arc::new(Mutex::new(Vec::new()));
    {
        let slot = Arc::clone(&slot);
        let nested = Arc::clone(&nested);
        cache.on_snapshot(move |file, _| {
            if file.ends_with("app/pom.xml")
                && let Some(reader) = slot.get().and_then(Weak::upgrade)
            {
                nested.lock().unwrap().push(reader.resolve_file(&pom("lib", "1.0")));
            }
        });
    }
    let reader = Arc::new(reader(&cache));
    slot.set(Arc::downgrade(&reader)).unwrap();

    let started = Instant::now();
    reader.add_to_workspace([&app, &lib]);
    assert!(reader.await_population(Duration::from_secs(4)).is_drained());
    // Well below the 5s drain timeout the nested query would otherwise hit.
    assert!(started.elapsed() < Duration::from_secs(4));

    assert_eq!(*nested.lock().unwrap(), vec![None]);
}

#![allow(dead_code)]

use pomscope_api::{Artifact, ArtifactLookup, Coordinate, ProjectCache, ProjectRecord};
use pomscope_core::WorkspaceReader;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type SnapshotHook = Arc<dyn Fn(&Path, &dyn ArtifactLookup) + Send + Sync>;

/// Project cache double: "parsing" a file returns whatever record was
/// registered for it.
#[derive(Default)]
pub struct InMemoryProjectCache {
    open: Mutex<Vec<Arc<ProjectRecord>>>,
    parsable: Mutex<HashMap<PathBuf, Arc<ProjectRecord>>>,
    last_successful: Mutex<HashMap<PathBuf, Arc<ProjectRecord>>>,
    on_snapshot: Mutex<Option<SnapshotHook>>,
    snapshots: AtomicUsize,
}

impl InMemoryProjectCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make `record` part of `projects()`, after those opened before it.
    pub fn open(&self, record: ProjectRecord) -> Arc<ProjectRecord> {
        let record = Arc::new(record);
        self.open.lock().unwrap().push(Arc::clone(&record));
        record
    }

    /// `snapshot_project(file)` will return `record`.
    pub fn parsable(&self, file: impl Into<PathBuf>, record: ProjectRecord) {
        self.parsable
            .lock()
            .unwrap()
            .insert(file.into(), Arc::new(record));
    }

    pub fn set_last_successful(&self, document: impl Into<PathBuf>, record: ProjectRecord) {
        self.last_successful
            .lock()
            .unwrap()
            .insert(document.into(), Arc::new(record));
    }

    /// Run `hook` inside every `snapshot_project` call, before it returns.
    pub fn on_snapshot(&self, hook: impl Fn(&Path, &dyn ArtifactLookup) + Send + Sync + 'static) {
        *self.on_snapshot.lock().unwrap() = Some(Arc::new(hook));
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.load(Ordering::SeqCst)
    }
}

impl ProjectCache for InMemoryProjectCache {
    fn projects(&self) -> Vec<Arc<ProjectRecord>> {
        self.open.lock().unwrap().clone()
    }

    fn snapshot_project(
        &self,
        file: &Path,
        lookup: &dyn ArtifactLookup,
    ) -> Option<Arc<ProjectRecord>> {
        self.snapshots.fetch_add(1, Ordering::SeqCst);
        let hook = self.on_snapshot.lock().unwrap().clone();
        if let Some(hook) = hook {
            hook(file, lookup);
        }
        self.parsable.lock().unwrap().get(file).cloned()
    }

    fn last_successful_project(&self, document: &Path) -> Option<Arc<ProjectRecord>> {
        self.last_successful.lock().unwrap().get(document).cloned()
    }
}

pub fn coordinate(artifact_id: &str, version: &str) -> Coordinate {
    Coordinate::new("org.example", artifact_id, version)
}

pub fn pom(artifact_id: &str, version: &str) -> Coordinate {
    coordinate(artifact_id, version).with_extension("pom")
}

/// A module with a jar packaging and the given descriptor.
pub fn module(artifact_id: &str, version: &str, descriptor: &Path) -> ProjectRecord {
    ProjectRecord::new(Artifact::new(coordinate(artifact_id, version))).with_descriptor(descriptor)
}

/// Creates `<root>/<dir>/pom.xml` and returns its path.
pub fn write_descriptor(root: &Path, dir: &str) -> PathBuf {
    let module_dir = root.join(dir);
    std::fs::create_dir_all(&module_dir).unwrap();
    let file = module_dir.join("pom.xml");
    std::fs::write(&file, "<project/>").unwrap();
    file
}

pub fn reader(cache: &Arc<InMemoryProjectCache>) -> WorkspaceReader {
    WorkspaceReader::builder(Arc::clone(cache) as Arc<dyn ProjectCache>)
        .with_drain_timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

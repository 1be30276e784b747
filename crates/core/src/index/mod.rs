//! Workspace artifact index: `groupId:artifactId:version` → backing file.
//!
//! Both directions are kept in sharded maps, so readers only ever take a
//! shard read lock and never wait on a writer touching another shard.
//!
//! Invariants:
//! - at most one file per key
//! - a file is the value of at most one key

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use pomscope_api::{ProjectKey, VersionlessKey};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

#[derive(Default)]
pub struct WorkspaceArtifactIndex {
    by_key: DashMap<ProjectKey, PathBuf>,
    by_file: DashMap<PathBuf, ProjectKey>,
}

impl WorkspaceArtifactIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key → file`.
    ///
    /// No-op (returns `false`) when `file` is already indexed under any key,
    /// which keeps one artifact from being indexed under two spellings.
    /// Replaces the previous file of `key` otherwise.
    pub fn put(&self, key: ProjectKey, file: PathBuf) -> bool {
        // Lock order is always by_file then by_key.
        let replaced = match self.by_file.entry(file.clone()) {
            Entry::Occupied(existing) => {
                trace!(
                    "{} already indexed as {}, skipping {}",
                    file.display(),
                    existing.get(),
                    key
                );
                return false;
            }
            Entry::Vacant(slot) => {
                // Hold the file slot until the forward entry exists, so a
                // concurrent remove_by_file sees both or neither.
                let _slot = slot.insert(key.clone());
                self.by_key.insert(key.clone(), file.clone())
            }
        };

        if let Some(stale) = replaced
            && stale != file
        {
            self.by_file.remove_if(&stale, |_, owner| owner == &key);
        }
        debug!("Indexed {} -> {}", key, file.display());
        true
    }

    /// Remove whatever entry `file` backs. Returns the key it was indexed under.
    pub fn remove_by_file(&self, file: &Path) -> Option<ProjectKey> {
        let (_, key) = self.by_file.remove(file)?;
        self.by_key.remove_if(&key, |_, indexed| indexed == file);
        debug!("Removed {} ({}) from index", key, file.display());
        Some(key)
    }

    pub fn find_by_project_key(&self, key: &ProjectKey) -> Option<PathBuf> {
        self.by_key.get(key).map(|entry| entry.value().clone())
    }

    /// All versions indexed for `groupId:artifactId`, in no particular order.
    pub fn find_versions(&self, key: &VersionlessKey) -> Vec<String> {
        self.by_key
            .iter()
            .filter(|entry| {
                entry.key().group_id == key.group_id && entry.key().artifact_id == key.artifact_id
            })
            .map(|entry| entry.key().version.clone())
            .collect()
    }

    pub fn contains_file(&self, file: &Path) -> bool {
        self.by_file.contains_key(file)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Point-in-time copy of all entries, sorted by key.
    pub fn entries(&self) -> Vec<(ProjectKey, PathBuf)> {
        let mut entries: Vec<_> = self
            .by_key
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        entries.sort();
        entries
    }
}

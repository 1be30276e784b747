use super::discovery::discover_descriptors;
use super::population::PopulationExecutor;
use super::resolution::Resolution;
use crate::config::ReaderConfig;
use crate::error::Result;
use crate::index::WorkspaceArtifactIndex;
use pomscope_api::{ArtifactLookup, Coordinate, ProjectCache, WorkspaceRepository};
use pomscope_ingest::{DrainStatus, SerialQueue};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub struct WorkspaceReaderBuilder {
    cache: Arc<dyn ProjectCache>,
    config: ReaderConfig,
}

impl WorkspaceReaderBuilder {
    pub fn new(cache: Arc<dyn ProjectCache>) -> Self {
        Self {
            cache,
            config: ReaderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_drain_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_drain_timeout(timeout);
        self
    }

    /// Start the population worker. Fails only if the thread cannot be
    /// spawned.
    pub fn build(self) -> Result<WorkspaceReader> {
        let index = Arc::new(WorkspaceArtifactIndex::new());
        let executor = PopulationExecutor {
            cache: Arc::clone(&self.cache),
            index: Arc::clone(&index),
            descriptor_extension: self.config.descriptor_extension.clone(),
        };
        let queue =
            SerialQueue::<PathBuf>::spawn(self.config.worker_name.clone(), Arc::new(executor))?;
        info!(
            "Workspace reader '{}' started (drain timeout {:?})",
            self.config.repository_id,
            self.config.drain_timeout()
        );

        Ok(WorkspaceReader {
            cache: self.cache,
            index,
            queue,
            repository: WorkspaceRepository::new(self.config.repository_id.clone()),
            config: self.config,
        })
    }
}

/// Resolves coordinates to files of the modules open in the workspace.
///
/// Files added through [`WorkspaceReader::add_to_workspace`] are parsed in
/// the background by a single worker and indexed by `groupId:artifactId:version`.
/// Queries first wait (bounded) for files added before them, then look at
/// the cached projects and finally at the index.
///
/// When several cached projects share a project key, the first one in
/// [`ProjectCache::projects`] order that yields a file wins.
pub struct WorkspaceReader {
    cache: Arc<dyn ProjectCache>,
    index: Arc<WorkspaceArtifactIndex>,
    queue: SerialQueue<PathBuf>,
    repository: WorkspaceRepository,
    config: ReaderConfig,
}

impl WorkspaceReader {
    pub fn builder(cache: Arc<dyn ProjectCache>) -> WorkspaceReaderBuilder {
        WorkspaceReaderBuilder::new(cache)
    }

    pub fn repository(&self) -> &WorkspaceRepository {
        &self.repository
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Queue one population task per file. Returns how many were queued.
    pub fn add_to_workspace<I>(&self, files: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        let mut queued = 0;
        for file in files {
            let file = file.into();
            match self.queue.submit(file.clone()) {
                Ok(ticket) => {
                    debug!("Queued {} as task #{}", file.display(), ticket);
                    queued += 1;
                }
                Err(err) => warn!("Cannot queue {}: {}", file.display(), err),
            }
        }
        queued
    }

    pub fn add_uris(&self, uris: &[Url]) -> usize {
        self.add_to_workspace(uris.iter().filter_map(file_path))
    }

    /// Discover descriptors under `root` and queue them, deepest first.
    pub fn add_workspace_folder(&self, root: &Path) -> usize {
        let descriptors = discover_descriptors(root, &self.config.descriptor_file_names);
        info!(
            "Found {} descriptors under {}",
            descriptors.len(),
            root.display()
        );
        self.add_to_workspace(descriptors)
    }

    /// Drop the index entry backed by `file`. Does not retract a population
    /// task for `file` that is still queued.
    pub fn remove(&self, file: &Path) -> bool {
        self.index.remove_by_file(file).is_some()
    }

    pub fn remove_uri(&self, uri: &Url) -> bool {
        file_path(uri).is_some_and(|file| self.remove(&file))
    }

    pub fn resolve_file(&self, coordinate: &Coordinate) -> Option<PathBuf> {
        self.wait_for_population();
        let found = self.resolution().find_artifact(coordinate);
        debug!(
            "resolve_file {} -> {}",
            coordinate,
            found
                .as_deref()
                .map_or_else(|| "not found".to_string(), |f| f.display().to_string())
        );
        found
    }

    /// Versions known for the coordinate's `groupId:artifactId`, newest first.
    pub fn resolve_versions(&self, coordinate: &Coordinate) -> Vec<String> {
        self.wait_for_population();
        self.resolution().find_versions(coordinate)
    }

    /// Wait until every file added so far has been processed.
    pub fn await_population(&self, timeout: Duration) -> DrainStatus {
        self.queue.await_drain(timeout)
    }

    pub fn index(&self) -> &WorkspaceArtifactIndex {
        &self.index
    }

    /// Stop accepting files and wait for the worker to finish the queued ones.
    pub fn shutdown(&self) {
        self.queue.shutdown();
    }

    fn resolution(&self) -> Resolution<'_> {
        Resolution {
            cache: self.cache.as_ref(),
            index: self.index.as_ref(),
            descriptor_extension: &self.config.descriptor_extension,
        }
    }

    fn wait_for_population(&self) {
        // The worker would be waiting for itself.
        if self.queue.is_worker_thread() {
            return;
        }
        let timeout = self.config.drain_timeout();
        if let DrainStatus::TimedOut { pending } = self.queue.await_drain(timeout) {
            warn!(
                "Population has {} pending tasks after {:?}, answering from current state",
                pending, timeout
            );
        }
    }
}

impl ArtifactLookup for WorkspaceReader {
    fn find_artifact(&self, coordinate: &Coordinate) -> Option<PathBuf> {
        self.resolve_file(coordinate)
    }

    fn find_versions(&self, coordinate: &Coordinate) -> Vec<String> {
        self.resolve_versions(coordinate)
    }
}

fn file_path(uri: &Url) -> Option<PathBuf> {
    if uri.scheme() != "file" {
        warn!("Ignoring non-file location {}", uri);
        return None;
    }
    uri.to_file_path().ok()
}

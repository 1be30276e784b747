use super::resolution::Resolution;
use crate::index::WorkspaceArtifactIndex;
use pomscope_api::{ArtifactLookup, Coordinate, ProjectCache};
use pomscope_ingest::{Executor, IngestError};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, trace};

/// Lookup handed to the project cache while a population task parses a
/// file. It never waits for the population queue: the task doing the
/// parsing is the one the queue would be waiting for.
pub struct PopulationScope<'a> {
    resolution: Resolution<'a>,
}

impl<'a> PopulationScope<'a> {
    pub fn new(
        cache: &'a dyn ProjectCache,
        index: &'a WorkspaceArtifactIndex,
        descriptor_extension: &'a str,
    ) -> Self {
        Self {
            resolution: Resolution {
                cache,
                index,
                descriptor_extension,
            },
        }
    }
}

impl ArtifactLookup for PopulationScope<'_> {
    fn find_artifact(&self, coordinate: &Coordinate) -> Option<PathBuf> {
        trace!("Nested lookup of {} during population", coordinate);
        self.resolution.find_artifact(coordinate)
    }

    fn find_versions(&self, coordinate: &Coordinate) -> Vec<String> {
        self.resolution.find_versions(coordinate)
    }
}

/// Turns "file added to workspace" into an index entry.
pub struct PopulationExecutor {
    pub cache: Arc<dyn ProjectCache>,
    pub index: Arc<WorkspaceArtifactIndex>,
    pub descriptor_extension: String,
}

impl Executor<PathBuf> for PopulationExecutor {
    fn execute(&self, file: PathBuf) -> Result<(), IngestError> {
        if self.index.contains_file(&file) {
            trace!("{} already indexed", file.display());
            return Ok(());
        }

        let scope = PopulationScope::new(
            self.cache.as_ref(),
            self.index.as_ref(),
            &self.descriptor_extension,
        );
        let Some(project) = self.cache.snapshot_project(&file, &scope) else {
            debug!("No project snapshot for {}, not indexing", file.display());
            return Ok(());
        };
        let Some(key) = project.project_key() else {
            debug!("Project from {} has no coordinate, not indexing", file.display());
            return Ok(());
        };

        self.index.put(key, file);
        Ok(())
    }
}

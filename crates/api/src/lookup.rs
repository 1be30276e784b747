use crate::models::Coordinate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Resolves coordinates against workspace state.
///
/// `None` / empty results are not errors; they mean the coordinate should
/// be resolved from a regular repository instead.
pub trait ArtifactLookup {
    fn find_artifact(&self, coordinate: &Coordinate) -> Option<PathBuf>;

    /// Known versions for the coordinate's `groupId:artifactId`, newest first.
    fn find_versions(&self, coordinate: &Coordinate) -> Vec<String>;
}

/// Identity of a workspace as a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRepository {
    pub id: String,
}

impl WorkspaceRepository {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

use super::matching::{find_in_project, sort_newest_first};
use crate::index::WorkspaceArtifactIndex;
use pomscope_api::{ArtifactLookup, Coordinate, ProjectCache};
use std::path::PathBuf;

/// Resolution over the current state of the project cache and the index,
/// without waiting for pending population work.
///
/// Cached projects take priority over the index. Among projects sharing a
/// project key, the first one in [`ProjectCache::projects`] order that
/// yields a file wins; a record without a matching file is skipped.
pub struct Resolution<'a> {
    pub cache: &'a dyn ProjectCache,
    pub index: &'a WorkspaceArtifactIndex,
    pub descriptor_extension: &'a str,
}

impl ArtifactLookup for Resolution<'_> {
    fn find_artifact(&self, coordinate: &Coordinate) -> Option<PathBuf> {
        let key = coordinate.project_key();
        self.cache
            .projects()
            .iter()
            .filter(|project| project.project_key().as_ref() == Some(&key))
            .find_map(|project| find_in_project(project, coordinate, self.descriptor_extension))
            .or_else(|| self.index.find_by_project_key(&key))
    }

    fn find_versions(&self, coordinate: &Coordinate) -> Vec<String> {
        let key = coordinate.versionless_key();
        let from_projects = self
            .cache
            .projects()
            .iter()
            .filter(|project| project.versionless_key().as_ref() == Some(&key))
            .filter_map(|project| {
                let version = project.version()?.to_string();
                let probe = Coordinate {
                    version: version.clone(),
                    ..coordinate.clone()
                };
                find_in_project(project, &probe, self.descriptor_extension).map(|_| version)
            })
            .collect::<Vec<_>>();

        sort_newest_first(from_projects.into_iter().chain(self.index.find_versions(&key)))
    }
}

use crate::lookup::ArtifactLookup;
use crate::models::ProjectRecord;
use std::path::Path;
use std::sync::Arc;

/// Source of parsed project models.
///
/// Implementations are expected to be idempotent and free of side effects
/// visible to the resolver.
pub trait ProjectCache: Send + Sync {
    /// Current snapshot of cached projects, in registration order.
    ///
    /// When several records share a project key the resolver uses the
    /// first one that yields a file, so the order must be stable.
    fn projects(&self) -> Vec<Arc<ProjectRecord>>;

    /// Parse (or fetch) the project described by `file`.
    ///
    /// Parsing may need to resolve sibling modules; such lookups must go
    /// through `lookup` rather than through a reader held by the cache, so
    /// that they run in the caller's context. Failure is reported as `None`.
    fn snapshot_project(
        &self,
        file: &Path,
        lookup: &dyn ArtifactLookup,
    ) -> Option<Arc<ProjectRecord>>;

    /// The last project successfully built from `document`, if any.
    fn last_successful_project(&self, document: &Path) -> Option<Arc<ProjectRecord>>;
}

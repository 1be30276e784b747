use super::coordinate::{Coordinate, ProjectKey, VersionlessKey};
use super::plugin::{PluginRef, RemoteRepository};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A coordinate together with the file backing it, if one has been built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub coordinate: Coordinate,
    pub file: Option<PathBuf>,
}

impl Artifact {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// The backing file, only when it exists on disk (i.e. the module has
    /// actually been packaged).
    pub fn existing_file(&self) -> Option<&Path> {
        self.file.as_deref().filter(|file| file.exists())
    }
}

/// In-memory representation of a parsed build module.
///
/// Records are produced and owned by a [`crate::ProjectCache`]; the
/// resolver only reads them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Primary output. `None` only for records that failed to produce a
    /// coordinate at all.
    pub artifact: Option<Artifact>,
    /// Secondary outputs (sources, test jars, ...).
    #[serde(default)]
    pub attached: Vec<Artifact>,
    /// The build descriptor this record was read from.
    pub descriptor: Option<PathBuf>,
    /// Runtime/effective view of the same module, when the cache keeps one
    /// distinct from this record.
    #[serde(skip)]
    pub execution: Option<Arc<ProjectRecord>>,

    /// Declared build plugins, keyed by `groupId:artifactId`.
    #[serde(default)]
    pub plugins: BTreeMap<String, PluginRef>,
    /// Plugins from plugin management, keyed by `groupId:artifactId`.
    /// `None` when the module declares no plugin management section.
    #[serde(default)]
    pub plugin_management: Option<BTreeMap<String, PluginRef>>,
    /// Resolved plugin artifacts, keyed by `groupId:artifactId`.
    #[serde(default)]
    pub plugin_artifacts: BTreeMap<String, Coordinate>,
    #[serde(default)]
    pub plugin_repositories: Vec<RemoteRepository>,
}

impl ProjectRecord {
    pub fn new(artifact: Artifact) -> Self {
        Self {
            artifact: Some(artifact),
            ..Self::default()
        }
    }

    pub fn with_descriptor(mut self, descriptor: impl Into<PathBuf>) -> Self {
        self.descriptor = Some(descriptor.into());
        self
    }

    pub fn with_attached(mut self, artifact: Artifact) -> Self {
        self.attached.push(artifact);
        self
    }

    pub fn with_execution(mut self, execution: Arc<ProjectRecord>) -> Self {
        self.execution = Some(execution);
        self
    }

    pub fn with_plugin(mut self, plugin: PluginRef) -> Self {
        self.plugins.insert(plugin.key(), plugin);
        self
    }

    pub fn with_managed_plugin(mut self, plugin: PluginRef) -> Self {
        self.plugin_management
            .get_or_insert_with(BTreeMap::new)
            .insert(plugin.key(), plugin);
        self
    }

    pub fn coordinate(&self) -> Option<&Coordinate> {
        self.artifact.as_ref().map(|a| &a.coordinate)
    }

    pub fn project_key(&self) -> Option<ProjectKey> {
        self.coordinate().map(Coordinate::project_key)
    }

    pub fn versionless_key(&self) -> Option<VersionlessKey> {
        self.coordinate().map(Coordinate::versionless_key)
    }

    pub fn version(&self) -> Option<&str> {
        self.coordinate().map(|c| c.version.as_str())
    }

    /// Declared build plugin by key.
    pub fn plugin(&self, key: &str) -> Option<&PluginRef> {
        self.plugins.get(key)
    }
}

use serde::{Deserialize, Serialize};

pub const DEFAULT_PLUGIN_GROUP_ID: &str = "org.apache.maven.plugins";

/// A build plugin as declared in a project (build plugins or plugin
/// management).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

impl PluginRef {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn key(&self) -> String {
        plugin_key(&self.group_id, &self.artifact_id)
    }
}

pub fn plugin_key(group_id: &str, artifact_id: &str) -> String {
    format!("{}:{}", group_id, artifact_id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRepository {
    pub id: String,
    pub layout: String,
    pub url: String,
}

/// Plugin descriptor as produced by a [`crate::PluginDescriptorResolver`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub mojos: Vec<MojoDescriptor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MojoDescriptor {
    pub goal: String,
    pub parameters: Vec<Parameter>,
}

/// A configurable mojo parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub required: bool,
    pub expression: Option<String>,
    pub default_value: Option<String>,
    pub description: Option<String>,
}

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_EXTENSION: &str = "jar";

/// Artifact coordinate: `groupId:artifactId:extension[:classifier]:version`.
///
/// Matching happens at three granularities:
/// - full: every field ([`PartialEq`])
/// - project key: `groupId:artifactId:version` ([`Coordinate::project_key`])
/// - versionless key: `groupId:artifactId` ([`Coordinate::versionless_key`])
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub extension: String,
    #[serde(default)]
    pub classifier: String,
}

impl Coordinate {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            classifier: String::new(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = classifier.into();
        self
    }

    pub fn project_key(&self) -> ProjectKey {
        ProjectKey::new(&self.group_id, &self.artifact_id, &self.version)
    }

    pub fn versionless_key(&self) -> VersionlessKey {
        VersionlessKey::new(&self.group_id, &self.artifact_id)
    }

    /// `groupId:artifactId:extension[:classifier]`, the identity of an
    /// artifact regardless of its version.
    pub fn versionless_id(&self) -> String {
        let mut id = format!("{}:{}:{}", self.group_id, self.artifact_id, self.extension);
        if !self.classifier.is_empty() {
            id.push(':');
            id.push_str(&self.classifier);
        }
        id
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.versionless_id(), self.version)
    }
}

impl FromStr for Coordinate {
    type Err = ApiError;

    /// Accepts `g:a:v`, `g:a:ext:v` and `g:a:ext:classifier:v`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let coordinate = match parts.as_slice() {
            [g, a, v] => Coordinate::new(*g, *a, *v),
            [g, a, ext, v] => Coordinate::new(*g, *a, *v).with_extension(*ext),
            [g, a, ext, classifier, v] => Coordinate::new(*g, *a, *v)
                .with_extension(*ext)
                .with_classifier(*classifier),
            _ => return Err(ApiError::InvalidCoordinate(s.to_string())),
        };
        if coordinate.group_id.is_empty()
            || coordinate.artifact_id.is_empty()
            || coordinate.version.is_empty()
            || coordinate.extension.is_empty()
        {
            return Err(ApiError::InvalidCoordinate(s.to_string()));
        }
        Ok(coordinate)
    }
}

/// `groupId:artifactId:version`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectKey {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl ProjectKey {
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
        }
    }

    pub fn versionless_key(&self) -> VersionlessKey {
        VersionlessKey::new(&self.group_id, &self.artifact_id)
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// `groupId:artifactId`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionlessKey {
    pub group_id: String,
    pub artifact_id: String,
}

impl VersionlessKey {
    pub fn new(group_id: &str, artifact_id: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
        }
    }
}

impl fmt::Display for VersionlessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

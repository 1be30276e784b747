//! Configuration parameters of the build plugin enclosing an editor position.
//!
//! Callers extract the enclosing plugin element and execution goals from the
//! document; this module finds the plugin in the document's last successful
//! project and asks a [`PluginDescriptorResolver`] for its descriptor.

use crate::error::{PomscopeError, Result};
use lsp_types::{MarkupContent, MarkupKind};
use pomscope_api::{
    DEFAULT_PLUGIN_GROUP_ID, Parameter, PluginDescriptor, PluginDescriptorResolver, PluginRef,
    ProjectCache, ProjectRecord, plugin_key,
};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::debug;

const LINE_BREAK: &str = "\n\n";

/// An editor position inside a `<plugin>` element.
#[derive(Debug, Clone, Default)]
pub struct PluginConfigurationRequest {
    pub document: PathBuf,
    /// `groupId` of the enclosing plugin element, when it has one.
    pub plugin_group_id: Option<String>,
    pub plugin_artifact_id: String,
    /// Goals of the enclosing `<execution>`, or `None` outside of one.
    pub execution_goals: Option<BTreeSet<String>>,
}

impl PluginConfigurationRequest {
    pub fn new(document: impl Into<PathBuf>, plugin_artifact_id: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            plugin_artifact_id: plugin_artifact_id.into(),
            ..Self::default()
        }
    }

    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.plugin_group_id = Some(group_id.into());
        self
    }

    pub fn with_execution_goals<I, S>(mut self, goals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execution_goals = Some(goals.into_iter().map(Into::into).collect());
        self
    }

    pub fn plugin_key(&self) -> String {
        plugin_key(
            self.plugin_group_id.as_deref().unwrap_or(DEFAULT_PLUGIN_GROUP_ID),
            &self.plugin_artifact_id,
        )
    }
}

/// Descriptor of the plugin enclosing `request`.
///
/// `Ok(None)` when the document has never produced a project. An error when
/// the project does not know the plugin or its descriptor cannot be loaded.
pub fn containing_plugin_descriptor(
    request: &PluginConfigurationRequest,
    cache: &dyn ProjectCache,
    resolver: &dyn PluginDescriptorResolver,
) -> Result<Option<PluginDescriptor>> {
    let Some(project) = cache.last_successful_project(&request.document) else {
        debug!("No project for {}", request.document.display());
        return Ok(None);
    };

    let key = request.plugin_key();
    let plugin = find_plugin(&project, &key, &request.plugin_artifact_id)
        .ok_or_else(|| PomscopeError::PluginDescriptor(format!("Unable to resolve {key}")))?;

    let descriptor = resolver.resolve(plugin, &project.plugin_repositories)?;
    Ok(Some(descriptor))
}

fn find_plugin<'a>(
    project: &'a ProjectRecord,
    key: &str,
    artifact_id: &str,
) -> Option<&'a PluginRef> {
    if let Some(plugin) = project.plugin(key) {
        return Some(plugin);
    }
    // Plugin artifacts are only resolved for projects with plugin management.
    let managed = project.plugin_management.as_ref()?;
    managed.get(key).or_else(|| {
        project
            .plugin_artifacts
            .iter()
            .filter(|(_, artifact)| artifact.artifact_id == artifact_id)
            .find_map(|(artifact_key, _)| project.plugin(artifact_key))
    })
}

/// Parameters of the enclosing plugin, limited to the mojos bound to the
/// enclosing execution's goals.
pub fn collect_configuration_parameters(
    request: &PluginConfigurationRequest,
    cache: &dyn ProjectCache,
    resolver: &dyn PluginDescriptorResolver,
) -> Result<Vec<Parameter>> {
    let Some(descriptor) = containing_plugin_descriptor(request, cache, resolver)? else {
        return Ok(Vec::new());
    };

    Ok(descriptor
        .mojos
        .into_iter()
        .filter(|mojo| {
            request
                .execution_goals
                .as_ref()
                .is_none_or(|goals| goals.contains(&mojo.goal))
        })
        .flat_map(|mojo| mojo.parameters)
        .collect())
}

pub fn markup_description(parameter: &Parameter) -> MarkupContent {
    markup(
        parameter,
        parameter.default_value.as_deref(),
        parameter.description.as_deref(),
    )
}

/// Like [`markup_description`], with default value and description taken
/// from `parent`.
pub fn markup_description_with_parent(parameter: &Parameter, parent: &Parameter) -> MarkupContent {
    markup(
        parameter,
        parent.default_value.as_deref(),
        parent.description.as_deref(),
    )
}

fn markup(
    parameter: &Parameter,
    default_value: Option<&str>,
    description: Option<&str>,
) -> MarkupContent {
    let value = [
        format!("**required:** {}", parameter.required),
        format!("**Type:** {}", parameter.type_name),
        format!(
            "Expression: {}",
            parameter.expression.as_deref().unwrap_or_default()
        ),
        format!("Default Value: {}", default_value.unwrap_or_default()),
        description.unwrap_or_default().to_string(),
    ]
    .join(LINE_BREAK);

    MarkupContent {
        kind: MarkupKind::Markdown,
        value,
    }
}

use crate::error::ApiResult;
use crate::models::{PluginDescriptor, PluginRef, RemoteRepository};

/// Loads the descriptor of a build plugin, typically by downloading and
/// reading the plugin artifact.
pub trait PluginDescriptorResolver: Send + Sync {
    fn resolve(
        &self,
        plugin: &PluginRef,
        repositories: &[RemoteRepository],
    ) -> ApiResult<PluginDescriptor>;
}

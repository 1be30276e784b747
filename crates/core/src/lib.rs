pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod plugin;
pub mod workspace;

pub use config::ReaderConfig;
pub use error::{PomscopeError, Result};
pub use index::WorkspaceArtifactIndex;
pub use plugin::{
    PluginConfigurationRequest, collect_configuration_parameters, containing_plugin_descriptor,
    markup_description, markup_description_with_parent,
};
pub use pomscope_ingest::DrainStatus;
pub use workspace::{WorkspaceReader, WorkspaceReaderBuilder};

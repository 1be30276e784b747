pub mod cache;
pub mod error;
pub mod lookup;
pub mod models;
pub mod plugin;

// Re-export commonly used types
pub use cache::ProjectCache;
pub use error::{ApiError, ApiResult};
pub use lookup::{ArtifactLookup, WorkspaceRepository};
pub use models::*;
pub use plugin::PluginDescriptorResolver;

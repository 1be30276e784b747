pub mod coordinate;
pub mod plugin;
pub mod project;
pub mod version;

pub use coordinate::*;
pub use plugin::*;
pub use project::*;
pub use version::ComparableVersion;

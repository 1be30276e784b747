//! Workspace-aware artifact resolution.

pub mod discovery;
pub mod matching;
pub mod population;
pub mod reader;
pub mod resolution;

pub use discovery::discover_descriptors;
pub use population::{PopulationExecutor, PopulationScope};
pub use reader::{WorkspaceReader, WorkspaceReaderBuilder};
pub use resolution::Resolution;

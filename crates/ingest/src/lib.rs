pub mod error;
pub mod runtime;
pub mod traits;
pub mod types;

pub use error::IngestError;
pub use runtime::{ProgressTracker, SerialQueue};
pub use traits::Executor;
pub use types::{DrainStatus, Ticket};

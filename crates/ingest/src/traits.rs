use crate::error::IngestError;

/// Runs one queued task.
///
/// An `Err` is logged by the queue and does not stop it; the next task runs
/// regardless.
pub trait Executor<P>: Send + Sync {
    fn execute(&self, payload: P) -> Result<(), IngestError>;
}

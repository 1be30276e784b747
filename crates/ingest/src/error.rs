use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to spawn worker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("queue closed: {0}")]
    Closed(String),
    #[error("execution failed: {0}")]
    Execution(String),
}

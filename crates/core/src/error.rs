use thiserror::Error;

#[derive(Error, Debug)]
pub enum PomscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Queue error: {0}")]
    Queue(#[from] pomscope_ingest::IngestError),
    #[error("Plugin descriptor error: {0}")]
    PluginDescriptor(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<pomscope_api::ApiError> for PomscopeError {
    fn from(err: pomscope_api::ApiError) -> Self {
        match err {
            pomscope_api::ApiError::PluginDescriptor(msg) => PomscopeError::PluginDescriptor(msg),
            other => PomscopeError::Internal(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PomscopeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pomscope_api::{ApiError, Coordinate};

    #[test]
    fn test_api_errors_map_to_pomscope_errors() {
        let err: PomscopeError = ApiError::PluginDescriptor("exec".to_string()).into();
        assert!(matches!(err, PomscopeError::PluginDescriptor(msg) if msg == "exec"));

        let invalid = "org.example".parse::<Coordinate>().unwrap_err();
        let err: PomscopeError = invalid.into();
        assert_eq!(err.to_string(), "Internal error: Invalid coordinate: org.example");
    }
}

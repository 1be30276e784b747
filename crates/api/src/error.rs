#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("Unresolvable plugin descriptor: {0}")]
    PluginDescriptor(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

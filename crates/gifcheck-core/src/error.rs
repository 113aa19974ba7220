use thiserror::Error;

/// Notifier error types
#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid event payload: {0}")]
    InvalidEvent(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Timed out after {0} seconds waiting for checks to settle")]
    Timeout(u64),
}

pub type NotifierResult<T> = Result<T, NotifierError>;

// Conversion from serde_json errors
impl From<serde_json::Error> for NotifierError {
    fn from(err: serde_json::Error) -> Self {
        NotifierError::SerializationError(err.to_string())
    }
}

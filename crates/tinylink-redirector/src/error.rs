use thiserror::Error;
use tinylink_core::StorageError;

#[derive(Debug, Clone, Error)]
pub enum RedirectorError {
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("storage backend unavailable: {0}")]
    StoreUnavailable(String),
    #[error("storage operation failed: {0}")]
    Storage(String),
}

impl From<StorageError> for RedirectorError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound(message) => Self::NotFound(message),
            StorageError::Unavailable(message) | StorageError::Timeout(message) => {
                Self::StoreUnavailable(message)
            }
            other => Self::Storage(other.to_string()),
        }
    }
}

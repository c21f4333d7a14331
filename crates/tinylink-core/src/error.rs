use crate::link::LinkId;
use crate::shortcode::ShortCode;
use thiserror::Error;

/// Errors related to the core value types of the URL shortener.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("invalid short code length {length}; expected {min}..={max}")]
    InvalidCodeLength { length: usize, min: usize, max: usize },
    #[error("invalid link id: {0}")]
    InvalidLinkId(String),
}

/// The uniqueness constraint an insert ran into.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Conflict {
    #[error("short code already exists: {0}")]
    Code(ShortCode),
    #[error("original url already exists: {0}")]
    Url(String),
}

/// Errors reported by a [`Registry`](crate::registry::Registry) backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("conflict: {0}")]
    Conflict(#[from] Conflict),
    #[error("link not found: {0}")]
    NotFound(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

impl StorageError {
    /// A `NotFound` for a link id.
    pub fn link_not_found(id: LinkId) -> Self {
        Self::NotFound(format!("id {id}"))
    }

    /// A `NotFound` for a short code.
    pub fn code_not_found(code: &ShortCode) -> Self {
        Self::NotFound(format!("code {code}"))
    }
}

/// Errors surfaced by a [`Shortener`](crate::shortener::Shortener).
///
/// Code collisions are retried inside the shortener and never show up here.
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("link not found: {0}")]
    NotFound(String),
    #[error("no free short code found after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },
    #[error("storage backend unavailable: {0}")]
    StoreUnavailable(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound(message) => Self::NotFound(message),
            StorageError::Unavailable(message) | StorageError::Timeout(message) => {
                Self::StoreUnavailable(message)
            }
            other => Self::Storage(other.to_string()),
        }
    }
}

/// Storage-specific errors
use thiserror::Error;
use tilawa_core::TilawaError;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Encoding a value or decoding the store document failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The key-value backend reported an error
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<TilawaError> for StorageError {
    fn from(err: TilawaError) -> Self {
        match err {
            TilawaError::Io(e) => Self::Io(e),
            TilawaError::Serialization(e) => Self::Serialization(e.to_string()),
            other => Self::Backend(other.to_string()),
        }
    }
}

impl From<StorageError> for TilawaError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => TilawaError::Io(e),
            other => TilawaError::storage(other.to_string()),
        }
    }
}

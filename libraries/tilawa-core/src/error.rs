/// Core error types for Tilawa
use thiserror::Error;

/// Result type alias using `TilawaError`
pub type Result<T> = std::result::Result<T, TilawaError>;

/// Core error type for Tilawa
///
/// Shared by the platform collaborator traits so that adapters for
/// location, heading, audio and storage report failures the same way.
#[derive(Error, Debug)]
pub enum TilawaError {
    /// Bad input to a pure function or an out-of-range parameter
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Playlist index misuse
    #[error("Index {index} out of range for playlist of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },

    /// Audio resource failed to load or decode
    #[error("Failed to load resource: {0}")]
    ResourceLoad(String),

    /// The platform refused access (e.g. location permission)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The location collaborator could not produce a fix
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    /// Audio renderer failure outside of loading
    #[error("Renderer error: {0}")]
    Renderer(String),

    /// Key-value storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl TilawaError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a resource load error
    pub fn resource_load(msg: impl Into<String>) -> Self {
        Self::ResourceLoad(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Create a position unavailable error
    pub fn position_unavailable(msg: impl Into<String>) -> Self {
        Self::PositionUnavailable(msg.into())
    }

    /// Create a renderer error
    pub fn renderer(msg: impl Into<String>) -> Self {
        Self::Renderer(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Whether the error comes from the device environment rather than a
    /// programming mistake
    pub fn is_environmental(&self) -> bool {
        matches!(
            self,
            Self::ResourceLoad(_)
                | Self::PermissionDenied(_)
                | Self::PositionUnavailable(_)
                | Self::Renderer(_)
                | Self::Storage(_)
                | Self::Io(_)
        )
    }
}

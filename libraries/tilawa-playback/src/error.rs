//! Error types for playlist control

use thiserror::Error;
use tilawa_core::TilawaError;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Bad parameter, e.g. a non-positive playback rate
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Index outside the current playlist
    #[error("Index {index} out of range for playlist of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },

    /// Resource could not be loaded, decoded or started
    ///
    /// Recoverable: the controller is back in `Idle`.
    #[error("Failed to load {resource}: {reason}")]
    ResourceLoad { resource: String, reason: String },

    /// Renderer failure on an already-playing resource
    #[error("Renderer error: {0}")]
    Renderer(String),

    /// The operation was superseded by a newer transport call
    ///
    /// Only used internally; public operations treat it as a no-op.
    #[error("Superseded by a newer playback session")]
    Stale,
}

impl From<TilawaError> for PlaybackError {
    fn from(err: TilawaError) -> Self {
        match err {
            TilawaError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            TilawaError::IndexOutOfRange { index, len } => Self::IndexOutOfRange { index, len },
            TilawaError::ResourceLoad(reason) => Self::ResourceLoad {
                resource: String::new(),
                reason,
            },
            other => Self::Renderer(other.to_string()),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Collapse a superseded outcome into success
pub(crate) fn ignore_stale(result: Result<()>) -> Result<()> {
    match result {
        Err(PlaybackError::Stale) => Ok(()),
        other => other,
    }
}

//! Playback Events
//!
//! Broadcast to every subscriber so the reader view, mini player and any
//! persistence layer can follow the controller without polling.

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by the playlist controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Any change of phase, index or rate
    StateChanged {
        /// Snapshot after the change
        state: PlaybackState,
    },

    /// A track started rendering
    TrackStarted {
        index: usize,
        resource_ref: String,
    },

    /// A track reached its end naturally (before auto-advance)
    TrackFinished { index: usize },

    /// Playback rate changed
    RateChanged { rate: f32 },

    /// Playlist replaced; playback is idle
    PlaylistReplaced {
        /// New playlist length
        length: usize,
    },

    /// A recoverable error occurred (load failure, auto-advance failure)
    Error {
        /// Error message
        message: String,
    },
}

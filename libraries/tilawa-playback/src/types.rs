//! Core types for playlist control

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the controller is in its lifecycle
///
/// Pausing releases the resource, so there is no separate paused phase:
/// a paused controller is `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackPhase {
    /// Nothing loaded
    #[default]
    Idle,

    /// Waiting for the renderer to finish loading `current_index`
    Loading,

    /// Rendering `current_index`
    Playing,
}

/// Observable playback state
///
/// `current_index` is `None` or a valid index into the current playlist, and
/// `is_playing` is false whenever `current_index` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub phase: PlaybackPhase,
    pub current_index: Option<usize>,
    pub is_playing: bool,
    pub playback_rate: f32,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            phase: PlaybackPhase::Idle,
            current_index: None,
            is_playing: false,
            playback_rate: 1.0,
        }
    }
}

/// Configuration for the playlist controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Give up on a load with no ready/error signal after this long (default: 15s)
    pub load_timeout: Duration,

    /// Rate used until `set_playback_rate` is called (default: 1.0)
    pub initial_rate: f32,

    /// Buffered events per subscriber before lagging (default: 64)
    pub event_capacity: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            load_timeout: Duration::from_secs(15),
            initial_rate: 1.0,
            event_capacity: 64,
        }
    }
}

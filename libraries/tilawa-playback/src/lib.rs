//! Tilawa Playback
//!
//! Verse-by-verse recitation: a playlist controller that plays one track at a
//! time through an [`AudioRenderer`](tilawa_core::AudioRenderer), advances on
//! natural completion and stops after the last track.
//!
//! # Features
//!
//! - **Transport**: play / pause / stop / next / previous over an immutable playlist
//! - **Speed**: playback rate applied to the playing track without a restart
//! - **Superseding**: late loads and completions from an older session are discarded
//! - **Observation**: state snapshots over `watch`, events over `broadcast`
//! - **Selection binding**: stop when the open surah or juz changes
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tilawa_core::{AudioRenderer, Playlist};
//! use tilawa_playback::{PlaybackPhase, PlaylistController};
//!
//! # async fn example(renderer: Arc<dyn AudioRenderer>) -> tilawa_playback::Result<()> {
//! let controller = PlaylistController::new(renderer);
//! controller
//!     .set_playlist(Playlist::from_resources([
//!         "https://cdn.example/001001.mp3",
//!         "https://cdn.example/001002.mp3",
//!     ]))
//!     .await;
//!
//! controller.play(0).await?;
//!
//! // Wait for auto-advance to run off the end of the playlist
//! let mut state = controller.watch_state();
//! state
//!     .wait_for(|s| s.phase == PlaybackPhase::Idle)
//!     .await
//!     .ok();
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod controller;
mod error;
mod events;
mod selection;
mod types;

pub use controller::PlaylistController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use selection::follow_selection;
pub use types::{ControllerConfig, PlaybackPhase, PlaybackState};

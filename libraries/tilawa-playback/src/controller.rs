//! Playlist controller - sequential recitation playback
//!
//! Drives one [`AudioRenderer`] through an ordered playlist: play an index,
//! stop, step forward/back, change speed, and advance automatically when a
//! track ends.
//!
//! # Sessions
//!
//! Every state-changing call bumps a generation counter. Loading a resource
//! happens outside the session lock so `stop()` or `set_playlist()` can
//! supersede it; when the load returns, the generation it started with is
//! compared against the current one and a superseded resource is released
//! without ever being played. Completion signals and auto-advance carry the
//! generation of the session that produced them and are dropped once it has
//! moved on.

use crate::error::{ignore_stale, PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::types::{ControllerConfig, PlaybackPhase, PlaybackState};
use std::sync::Arc;
use tilawa_core::{AudioRenderer, CompletionSignal, Playlist, RenderHandle, TilawaError};
use tokio::sync::{broadcast, watch, Mutex};
use tracing::{debug, info, warn};

struct Session {
    playlist: Playlist,
    phase: PlaybackPhase,
    current_index: Option<usize>,
    rate: f32,
    generation: u64,
    loaded: Option<RenderHandle>,
}

impl Session {
    fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            phase: self.phase,
            current_index: self.current_index,
            is_playing: self.phase == PlaybackPhase::Playing,
            playback_rate: self.rate,
        }
    }
}

struct Shared {
    renderer: Arc<dyn AudioRenderer>,
    config: ControllerConfig,
    session: Mutex<Session>,
    state_tx: watch::Sender<PlaybackState>,
    events: broadcast::Sender<PlaybackEvent>,
}

impl Shared {
    fn emit(&self, event: PlaybackEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }

    fn publish(&self, session: &Session) {
        let state = session.snapshot();
        let previous = self.state_tx.send_replace(state);
        if previous != state {
            self.emit(PlaybackEvent::StateChanged { state });
        }
    }

    /// Stop and release whatever is loaded and return to `Idle`
    ///
    /// Always starts a new generation so anything in flight becomes stale.
    async fn teardown(&self, session: &mut Session) {
        session.generation += 1;
        session.phase = PlaybackPhase::Idle;
        session.current_index = None;

        if let Some(handle) = session.loaded.take() {
            if let Err(e) = self.renderer.stop(handle).await {
                warn!(%handle, error = %e, "Renderer failed to stop resource");
            }
            if let Err(e) = self.renderer.release(handle).await {
                warn!(%handle, error = %e, "Renderer failed to release resource");
            }
            debug!(%handle, generation = session.generation, "Released resource");
        }
    }

    fn fail_load(&self, session: &mut Session, resource: &str, reason: String) -> PlaybackError {
        session.generation += 1;
        session.phase = PlaybackPhase::Idle;
        session.current_index = None;

        warn!(%resource, %reason, "Failed to load track");
        let err = PlaybackError::ResourceLoad {
            resource: resource.to_string(),
            reason,
        };
        // Error event precedes the Idle snapshot
        self.emit(PlaybackEvent::Error {
            message: err.to_string(),
        });
        self.publish(session);
        err
    }
}

/// Sequential playback over a [`Playlist`]
///
/// Cheap to clone; clones share the same session.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use tilawa_core::{AudioRenderer, Playlist};
/// use tilawa_playback::PlaylistController;
///
/// # async fn example(renderer: Arc<dyn AudioRenderer>) -> tilawa_playback::Result<()> {
/// let controller = PlaylistController::new(renderer);
/// controller
///     .set_playlist(Playlist::from_resources(["https://cdn.example/1.mp3"]))
///     .await;
///
/// controller.play(0).await?;
/// controller.set_playback_rate(1.25).await?;
/// controller.stop().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PlaylistController {
    shared: Arc<Shared>,
}

impl PlaylistController {
    /// Create a controller with default configuration
    pub fn new(renderer: Arc<dyn AudioRenderer>) -> Self {
        Self::build(renderer, ControllerConfig::default())
    }

    /// Create a controller with explicit configuration
    ///
    /// # Errors
    /// `InvalidArgument` for a non-positive initial rate or a zero load timeout
    pub fn with_config(renderer: Arc<dyn AudioRenderer>, config: ControllerConfig) -> Result<Self> {
        validate_rate(config.initial_rate)?;
        if config.load_timeout.is_zero() {
            return Err(PlaybackError::InvalidArgument(
                "load timeout must be non-zero".to_string(),
            ));
        }
        Ok(Self::build(renderer, config))
    }

    fn build(renderer: Arc<dyn AudioRenderer>, config: ControllerConfig) -> Self {
        let session = Session {
            playlist: Playlist::empty(),
            phase: PlaybackPhase::Idle,
            current_index: None,
            rate: config.initial_rate,
            generation: 0,
            loaded: None,
        };
        let (state_tx, _rx) = watch::channel(session.snapshot());
        let (events, _rx) = broadcast::channel(config.event_capacity.max(1));

        Self {
            shared: Arc::new(Shared {
                renderer,
                config,
                session: Mutex::new(session),
                state_tx,
                events,
            }),
        }
    }

    // ===== Observation =====

    /// Current state snapshot
    pub fn state(&self) -> PlaybackState {
        *self.shared.state_tx.borrow()
    }

    /// Receiver that always holds the latest state
    pub fn watch_state(&self) -> watch::Receiver<PlaybackState> {
        self.shared.state_tx.subscribe()
    }

    /// Subscribe to playback events
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.shared.events.subscribe()
    }

    /// Copy of the current playlist
    pub async fn playlist(&self) -> Playlist {
        self.shared.session.lock().await.playlist.clone()
    }

    // ===== Transport =====

    /// Replace the playlist
    ///
    /// Stops and releases any current resource first; the controller is
    /// `Idle` afterwards regardless of its previous state.
    pub async fn set_playlist(&self, playlist: impl Into<Playlist>) {
        let playlist = playlist.into();
        let mut session = self.shared.session.lock().await;
        self.shared.teardown(&mut session).await;

        let length = playlist.len();
        session.playlist = playlist;
        info!(tracks = length, "Playlist replaced");

        self.shared.emit(PlaybackEvent::PlaylistReplaced { length });
        self.shared.publish(&session);
    }

    /// Play the track at `index`
    ///
    /// Calling this for the track that is already playing stops it instead of
    /// restarting it.
    ///
    /// # Errors
    /// - `IndexOutOfRange` if `index` is not in the playlist (state unchanged)
    /// - `ResourceLoad` if the renderer cannot load or start the resource;
    ///   the controller is left `Idle`
    pub async fn play(&self, index: usize) -> Result<()> {
        ignore_stale(self.start(index, None).await)
    }

    /// Release the resource and return to `Idle`
    ///
    /// Idempotent.
    pub async fn stop(&self) {
        // Stale can only come back when a generation is expected
        let _ = self.stop_if(None).await;
    }

    /// Same as [`stop`](Self::stop): pausing does not keep the resource loaded
    pub async fn pause(&self) {
        self.stop().await;
    }

    /// Advance to the next track, or stop after the last one
    ///
    /// No-op when nothing is selected.
    pub async fn play_next(&self) -> Result<()> {
        let (current, generation, len) = {
            let session = self.shared.session.lock().await;
            (
                session.current_index,
                session.generation,
                session.playlist.len(),
            )
        };
        let Some(current) = current else {
            return Ok(());
        };

        let outcome = if current + 1 < len {
            self.start(current + 1, Some(generation)).await
        } else {
            self.stop_if(Some(generation)).await
        };
        ignore_stale(outcome)
    }

    /// Go back one track
    ///
    /// No-op on the first track (no wrap-around) or when nothing is selected.
    pub async fn play_previous(&self) -> Result<()> {
        let (current, generation) = {
            let session = self.shared.session.lock().await;
            (session.current_index, session.generation)
        };
        match current {
            Some(current) if current > 0 => {
                ignore_stale(self.start(current - 1, Some(generation)).await)
            }
            _ => Ok(()),
        }
    }

    /// Change the playback rate
    ///
    /// Stored for future tracks and applied to the playing one without
    /// interrupting it.
    ///
    /// # Errors
    /// - `InvalidArgument` if `rate` is not a positive finite number
    /// - `Renderer` if the playing resource rejected the new rate (the rate
    ///   is still stored)
    pub async fn set_playback_rate(&self, rate: f32) -> Result<()> {
        validate_rate(rate)?;

        let mut session = self.shared.session.lock().await;
        if (session.rate - rate).abs() < f32::EPSILON {
            return Ok(());
        }
        session.rate = rate;
        self.shared.emit(PlaybackEvent::RateChanged { rate });
        self.shared.publish(&session);

        if session.phase == PlaybackPhase::Playing {
            if let Some(handle) = session.loaded {
                self.shared.renderer.set_rate(handle, rate).await?;
                debug!(%handle, rate, "Applied rate to playing resource");
            }
        }
        Ok(())
    }

    /// Stop playback and drop the playlist
    ///
    /// The controller can be reused with a new playlist afterwards.
    pub async fn shutdown(&self) {
        self.set_playlist(Playlist::empty()).await;
        debug!("Playlist controller shut down");
    }

    // ===== Internals =====

    /// Start `index`, optionally only if the session is still at `expected`
    async fn start(&self, index: usize, expected: Option<u64>) -> Result<()> {
        let shared = &self.shared;

        let (generation, resource) = {
            let mut session = shared.session.lock().await;
            if expected.is_some_and(|expected| expected != session.generation) {
                return Err(PlaybackError::Stale);
            }

            let len = session.playlist.len();
            let resource = session
                .playlist
                .get(index)
                .ok_or(PlaybackError::IndexOutOfRange { index, len })?
                .resource_ref
                .clone();

            if session.phase == PlaybackPhase::Playing && session.current_index == Some(index) {
                debug!(index, "Play requested for the playing track, stopping");
                shared.teardown(&mut session).await;
                shared.publish(&session);
                return Ok(());
            }

            shared.teardown(&mut session).await;
            session.phase = PlaybackPhase::Loading;
            session.current_index = Some(index);
            shared.publish(&session);
            (session.generation, resource)
        };

        debug!(index, %resource, generation, "Loading track");
        let timeout = shared.config.load_timeout;
        let loaded = tokio::time::timeout(timeout, shared.renderer.load(&resource)).await;

        let mut session = shared.session.lock().await;
        if session.generation != generation {
            if let Ok(Ok(handle)) = loaded {
                debug!(%handle, %resource, "Discarding superseded load");
                if let Err(e) = shared.renderer.release(handle).await {
                    warn!(%handle, error = %e, "Renderer failed to release superseded resource");
                }
            }
            return Err(PlaybackError::Stale);
        }

        let handle = match loaded {
            Ok(Ok(handle)) => handle,
            Ok(Err(TilawaError::ResourceLoad(reason))) => {
                return Err(shared.fail_load(&mut session, &resource, reason));
            }
            Ok(Err(e)) => return Err(shared.fail_load(&mut session, &resource, e.to_string())),
            Err(_elapsed) => {
                let reason = format!("no response within {timeout:?}");
                return Err(shared.fail_load(&mut session, &resource, reason));
            }
        };

        // Register before playing so a very short track cannot finish unseen
        let finished = shared.renderer.on_completion(handle);
        let rate = session.rate;
        let started = match shared.renderer.set_rate(handle, rate).await {
            Ok(()) => shared.renderer.play(handle).await,
            Err(e) => Err(e),
        };
        if let Err(e) = started {
            if let Err(release_err) = shared.renderer.release(handle).await {
                warn!(%handle, error = %release_err, "Renderer failed to release resource");
            }
            return Err(shared.fail_load(&mut session, &resource, e.to_string()));
        }

        session.loaded = Some(handle);
        session.phase = PlaybackPhase::Playing;
        info!(index, %resource, rate, "Track started");
        shared.emit(PlaybackEvent::TrackStarted {
            index,
            resource_ref: resource,
        });
        shared.publish(&session);
        drop(session);

        self.watch_completion(generation, index, finished);
        Ok(())
    }

    /// Stop, optionally only if the session is still at `expected`
    async fn stop_if(&self, expected: Option<u64>) -> Result<()> {
        let mut session = self.shared.session.lock().await;
        if expected.is_some_and(|expected| expected != session.generation) {
            return Err(PlaybackError::Stale);
        }
        if session.phase == PlaybackPhase::Idle {
            return Ok(());
        }

        self.shared.teardown(&mut session).await;
        debug!("Playback stopped");
        self.shared.publish(&session);
        Ok(())
    }

    fn watch_completion(&self, generation: u64, index: usize, finished: CompletionSignal) {
        let controller = self.clone();
        tokio::spawn(async move {
            // Err: the renderer dropped the signal because the resource was released
            if finished.await.is_ok() {
                controller.on_track_finished(generation, index).await;
            }
        });
    }

    /// Auto-advance after natural completion of `index`
    async fn on_track_finished(&self, generation: u64, index: usize) {
        let next = {
            let session = self.shared.session.lock().await;
            if session.generation != generation || session.phase != PlaybackPhase::Playing {
                debug!(index, generation, "Ignoring stale completion");
                return;
            }
            self.shared.emit(PlaybackEvent::TrackFinished { index });
            Some(index + 1).filter(|next| *next < session.playlist.len())
        };

        let outcome = match next {
            Some(next) => self.start(next, Some(generation)).await,
            None => {
                debug!(index, "Reached end of playlist");
                self.stop_if(Some(generation)).await
            }
        };

        if let Err(e) = ignore_stale(outcome) {
            warn!(index, error = %e, "Auto-advance failed");
        }
    }
}

impl std::fmt::Debug for PlaylistController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistController")
            .field("state", &self.state())
            .field("config", &self.shared.config)
            .finish_non_exhaustive()
    }
}

fn validate_rate(rate: f32) -> Result<()> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(PlaybackError::InvalidArgument(format!(
            "playback rate must be positive, got {rate}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_validation() {
        assert!(validate_rate(1.0).is_ok());
        assert!(validate_rate(0.5).is_ok());
        assert!(validate_rate(0.0).is_err());
        assert!(validate_rate(-1.0).is_err());
        assert!(validate_rate(f32::NAN).is_err());
        assert!(validate_rate(f32::INFINITY).is_err());
    }

    #[test]
    fn snapshot_reflects_phase() {
        let mut session = Session {
            playlist: Playlist::from_resources(["a", "b"]),
            phase: PlaybackPhase::Loading,
            current_index: Some(1),
            rate: 1.5,
            generation: 3,
            loaded: None,
        };
        let state = session.snapshot();
        assert_eq!(state.current_index, Some(1));
        assert!(!state.is_playing);

        session.phase = PlaybackPhase::Playing;
        assert!(session.snapshot().is_playing);
        assert_eq!(session.snapshot().playback_rate, 1.5);
    }
}

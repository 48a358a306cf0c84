//! Simulated audio renderer
//!
//! Stands in for a real audio output in the terminal: every resource "plays"
//! for a fixed media length, scaled by the playback rate, and then signals
//! completion. Position is tracked in media time so rate changes and stops
//! behave like a real player.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tilawa_core::{AudioRenderer, CompletionSignal, RenderHandle, Result, TilawaError};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

const SUPPORTED_SCHEMES: [&str; 3] = ["http://", "https://", "file://"];

struct Voice {
    resource: String,
    rate: f32,
    /// Media time consumed before the current segment
    position: Duration,
    /// Wall-clock start of the current segment while rendering
    segment_start: Option<Instant>,
    completion: Option<oneshot::Sender<()>>,
    timer: Option<JoinHandle<()>>,
}

impl Voice {
    fn consumed(&self, now: Instant) -> Duration {
        match self.segment_start {
            Some(start) => self.position + (now - start).mul_f32(self.rate),
            None => self.position,
        }
    }
}

type Voices = Arc<Mutex<HashMap<RenderHandle, Voice>>>;

/// Renderer whose tracks all last `track_length` of media time
pub struct SimulatedRenderer {
    track_length: Duration,
    next_handle: AtomicU64,
    voices: Voices,
}

impl SimulatedRenderer {
    pub fn new(track_length: Duration) -> Self {
        Self {
            track_length,
            next_handle: AtomicU64::new(1),
            voices: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn voices(&self) -> MutexGuard<'_, HashMap<RenderHandle, Voice>> {
        self.voices.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resources currently loaded
    pub fn loaded(&self) -> usize {
        self.voices().len()
    }

    /// Media time consumed by `handle`
    pub fn position(&self, handle: RenderHandle) -> Option<Duration> {
        let now = Instant::now();
        self.voices().get(&handle).map(|voice| voice.consumed(now))
    }

    /// (Re)arm the end-of-track timer from the voice's current position
    fn schedule(&self, handle: RenderHandle, voice: &mut Voice) {
        if let Some(timer) = voice.timer.take() {
            timer.abort();
        }

        let remaining = self.track_length.saturating_sub(voice.position);
        let wall = remaining.div_f32(voice.rate);
        let voices = Arc::clone(&self.voices);
        trace!(%handle, ?wall, "Scheduled end of track");

        voice.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(wall).await;
            let mut voices = voices.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(voice) = voices.get_mut(&handle) {
                voice.position = voice.consumed(Instant::now());
                voice.segment_start = None;
                voice.timer = None;
                if let Some(done) = voice.completion.take() {
                    debug!(%handle, resource = %voice.resource, "Track finished");
                    let _ = done.send(());
                }
            }
        }));
    }

    fn with_voice<T>(
        &self,
        handle: RenderHandle,
        f: impl FnOnce(&Self, &mut Voice) -> T,
    ) -> Result<T> {
        let mut voices = self.voices();
        let voice = voices
            .get_mut(&handle)
            .ok_or_else(|| TilawaError::renderer(format!("unknown {handle}")))?;
        Ok(f(self, voice))
    }
}

#[async_trait::async_trait]
impl AudioRenderer for SimulatedRenderer {
    async fn load(&self, resource: &str) -> Result<RenderHandle> {
        if !SUPPORTED_SCHEMES
            .iter()
            .any(|scheme| resource.starts_with(scheme))
        {
            return Err(TilawaError::resource_load(format!(
                "unsupported resource '{resource}'"
            )));
        }

        let handle = RenderHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.voices().insert(
            handle,
            Voice {
                resource: resource.to_string(),
                rate: 1.0,
                position: Duration::ZERO,
                segment_start: None,
                completion: None,
                timer: None,
            },
        );
        debug!(%handle, %resource, "Loaded");
        Ok(handle)
    }

    async fn play(&self, handle: RenderHandle) -> Result<()> {
        self.with_voice(handle, |renderer, voice| {
            if voice.segment_start.is_none() {
                voice.segment_start = Some(Instant::now());
                renderer.schedule(handle, voice);
            }
        })
    }

    async fn stop(&self, handle: RenderHandle) -> Result<()> {
        self.with_voice(handle, |_, voice| {
            voice.position = voice.consumed(Instant::now());
            voice.segment_start = None;
            if let Some(timer) = voice.timer.take() {
                timer.abort();
            }
        })
    }

    async fn release(&self, handle: RenderHandle) -> Result<()> {
        if let Some(voice) = self.voices().remove(&handle) {
            if let Some(timer) = voice.timer {
                timer.abort();
            }
            debug!(%handle, resource = %voice.resource, "Released");
        }
        Ok(())
    }

    async fn set_rate(&self, handle: RenderHandle, rate: f32) -> Result<()> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(TilawaError::invalid_argument(format!(
                "rate must be positive, got {rate}"
            )));
        }
        self.with_voice(handle, |renderer, voice| {
            let now = Instant::now();
            voice.position = voice.consumed(now);
            voice.rate = rate;
            if voice.segment_start.is_some() {
                voice.segment_start = Some(now);
                renderer.schedule(handle, voice);
            }
        })
    }

    fn on_completion(&self, handle: RenderHandle) -> CompletionSignal {
        let (tx, rx) = oneshot::channel();
        if let Some(voice) = self.voices().get_mut(&handle) {
            voice.completion = Some(tx);
        }
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn about(actual: Duration, expected: Duration) -> bool {
        let diff = if actual > expected {
            actual - expected
        } else {
            expected - actual
        };
        diff < Duration::from_millis(5)
    }

    #[tokio::test(start_paused = true)]
    async fn completes_after_track_length() {
        let renderer = SimulatedRenderer::new(Duration::from_secs(2));
        let handle = renderer.load("https://cdn.test/1.mp3").await.unwrap();
        let done = renderer.on_completion(handle);

        renderer.play(handle).await.unwrap();
        let started = Instant::now();
        done.await.unwrap();

        assert!(about(started.elapsed(), Duration::from_secs(2)));
        assert!(about(renderer.position(handle).unwrap(), Duration::from_secs(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn rate_scales_remaining_time() {
        let renderer = SimulatedRenderer::new(Duration::from_secs(4));
        let handle = renderer.load("https://cdn.test/1.mp3").await.unwrap();
        let done = renderer.on_completion(handle);
        let started = Instant::now();

        renderer.play(handle).await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        renderer.set_rate(handle, 2.0).await.unwrap();
        done.await.unwrap();

        // 2s at 1x, then the remaining 2s of media at 2x
        assert!(about(started.elapsed(), Duration::from_secs(3)));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_freezes_position() {
        let renderer = SimulatedRenderer::new(Duration::from_secs(4));
        let handle = renderer.load("file:///tmp/1.mp3").await.unwrap();
        let mut done = renderer.on_completion(handle);

        renderer.play(handle).await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        renderer.stop(handle).await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert!(about(renderer.position(handle).unwrap(), Duration::from_secs(1)));
        assert!(done.try_recv().is_err());
    }

    #[tokio::test]
    async fn release_drops_completion() {
        let renderer = SimulatedRenderer::new(Duration::from_secs(60));
        let handle = renderer.load("https://cdn.test/1.mp3").await.unwrap();
        let done = renderer.on_completion(handle);
        renderer.play(handle).await.unwrap();

        renderer.release(handle).await.unwrap();

        assert!(done.await.is_err());
        assert_eq!(renderer.loaded(), 0);
        assert!(renderer.play(handle).await.is_err());
    }

    #[tokio::test]
    async fn rejects_unknown_schemes() {
        let renderer = SimulatedRenderer::new(Duration::from_secs(1));
        assert!(matches!(
            renderer.load("ftp://cdn.test/1.mp3").await,
            Err(TilawaError::ResourceLoad(_))
        ));
    }
}

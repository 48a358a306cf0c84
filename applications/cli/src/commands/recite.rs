/// Simulated recitation run
use crate::config::AppConfig;
use crate::error::Result;
use crate::simulated::SimulatedRenderer;
use std::io::Write;
use std::sync::Arc;
use tilawa_core::{AudioRenderer, Playlist};
use tilawa_playback::{ControllerConfig, PlaybackEvent, PlaybackPhase, PlaylistController};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReciteSummary {
    pub started: Vec<usize>,
    pub finished: Vec<usize>,
    pub errors: Vec<String>,
    /// Run ended by Ctrl-C rather than by reaching the end
    pub interrupted: bool,
}

/// Recite `resources` from `start` at `rate` through the simulated renderer
pub async fn run(
    config: &AppConfig,
    resources: Vec<String>,
    rate: f32,
    start: usize,
    out: &mut impl Write,
) -> Result<ReciteSummary> {
    let renderer = Arc::new(SimulatedRenderer::new(config.simulated_track()));
    run_with(config, renderer, resources, rate, start, out).await
}

/// Same as [`run`] with any renderer
pub async fn run_with(
    config: &AppConfig,
    renderer: Arc<dyn AudioRenderer>,
    resources: Vec<String>,
    rate: f32,
    start: usize,
    out: &mut impl Write,
) -> Result<ReciteSummary> {
    let controller = PlaylistController::with_config(
        renderer,
        ControllerConfig {
            load_timeout: config.load_timeout(),
            initial_rate: rate,
            ..ControllerConfig::default()
        },
    )?;
    let mut events = controller.subscribe();

    let playlist = Playlist::from_resources(resources);
    info!(tracks = playlist.len(), start, rate, "Starting recitation");
    controller.set_playlist(playlist.clone()).await;

    let mut summary = ReciteSummary::default();
    if let Err(e) = controller.play(start).await {
        warn!(error = %e, "Recitation could not start");
        return Err(e.into());
    }

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    if record(&event, &playlist, &mut summary, out)? {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Event listener lagged");
                    if controller.state().phase == PlaybackPhase::Idle {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
            },
            _ = &mut interrupt => {
                writeln!(out, "Interrupted")?;
                summary.interrupted = true;
                break;
            }
        }
    }

    controller.shutdown().await;
    Ok(summary)
}

/// Print one event; returns true once playback has gone idle
fn record(
    event: &PlaybackEvent,
    playlist: &Playlist,
    summary: &mut ReciteSummary,
    out: &mut impl Write,
) -> std::io::Result<bool> {
    match event {
        PlaybackEvent::TrackStarted {
            index,
            resource_ref,
        } => {
            writeln!(out, "▶ [{}/{}] {resource_ref}", index + 1, playlist.len())?;
            summary.started.push(*index);
        }
        PlaybackEvent::TrackFinished { index } => {
            summary.finished.push(*index);
        }
        PlaybackEvent::RateChanged { rate } => {
            writeln!(out, "  rate {rate}x")?;
        }
        PlaybackEvent::Error { message } => {
            writeln!(out, "✗ {message}")?;
            summary.errors.push(message.clone());
        }
        PlaybackEvent::StateChanged { state } if state.phase == PlaybackPhase::Idle => {
            writeln!(out, "■ Stopped")?;
            return Ok(true);
        }
        PlaybackEvent::StateChanged { .. } | PlaybackEvent::PlaylistReplaced { .. } => {}
    }
    Ok(false)
}

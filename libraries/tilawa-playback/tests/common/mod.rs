//! Shared test helpers for playback tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tilawa_core::{AudioRenderer, CompletionSignal, Playlist, RenderHandle, Result, TilawaError};
use tilawa_playback::PlaybackState;
use tokio::sync::{oneshot, watch, Notify};

/// In-memory renderer that records every call
///
/// Loads complete immediately unless the resource was marked with
/// [`fail`](Self::fail), [`hold`](Self::hold) or [`hang`](Self::hang).
/// Tracks never end on their own; call [`finish_current`](Self::finish_current).
#[derive(Default)]
pub struct FakeRenderer {
    next_handle: AtomicU64,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    loads: Vec<String>,
    resources: HashMap<RenderHandle, String>,
    playing: Vec<RenderHandle>,
    played: Vec<String>,
    released: Vec<RenderHandle>,
    rates: HashMap<RenderHandle, f32>,
    completions: HashMap<RenderHandle, oneshot::Sender<()>>,
    failing: HashSet<String>,
    hanging: HashSet<String>,
    held: HashMap<String, Arc<Notify>>,
}

impl FakeRenderer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Loading `resource` fails with a load error
    pub fn fail(&self, resource: &str) {
        self.inner.lock().unwrap().failing.insert(resource.to_string());
    }

    /// Loading `resource` never completes
    pub fn hang(&self, resource: &str) {
        self.inner.lock().unwrap().hanging.insert(resource.to_string());
    }

    /// Loading `resource` waits until [`unhold`](Self::unhold)
    pub fn hold(&self, resource: &str) {
        self.inner
            .lock()
            .unwrap()
            .held
            .insert(resource.to_string(), Arc::new(Notify::new()));
    }

    pub fn unhold(&self, resource: &str) {
        if let Some(notify) = self.inner.lock().unwrap().held.remove(resource) {
            notify.notify_one();
        }
    }

    /// Signal natural completion of the most recently started track
    pub fn finish_current(&self) {
        let handle = self.inner.lock().unwrap().playing.last().copied();
        if let Some(handle) = handle {
            self.finish(handle);
        }
    }

    /// Signal completion of `handle`, even if it was already released
    pub fn finish(&self, handle: RenderHandle) {
        if let Some(tx) = self.inner.lock().unwrap().completions.remove(&handle) {
            let _ = tx.send(());
        }
    }

    pub fn loads(&self) -> Vec<String> {
        self.inner.lock().unwrap().loads.clone()
    }

    pub fn played(&self) -> Vec<String> {
        self.inner.lock().unwrap().played.clone()
    }

    pub fn playing(&self) -> Vec<RenderHandle> {
        self.inner.lock().unwrap().playing.clone()
    }

    pub fn playing_resource(&self) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .playing
            .last()
            .and_then(|handle| inner.resources.get(handle).cloned())
    }

    pub fn released(&self) -> Vec<RenderHandle> {
        self.inner.lock().unwrap().released.clone()
    }

    pub fn handle_of(&self, resource: &str) -> Option<RenderHandle> {
        let inner = self.inner.lock().unwrap();
        inner
            .resources
            .iter()
            .filter(|(_, r)| r.as_str() == resource)
            .map(|(handle, _)| *handle)
            .max_by_key(|handle| handle.0)
    }

    pub fn rate_of(&self, handle: RenderHandle) -> Option<f32> {
        self.inner.lock().unwrap().rates.get(&handle).copied()
    }
}

#[async_trait]
impl AudioRenderer for FakeRenderer {
    async fn load(&self, resource: &str) -> Result<RenderHandle> {
        let (held, hanging) = {
            let mut inner = self.inner.lock().unwrap();
            inner.loads.push(resource.to_string());
            if inner.failing.contains(resource) {
                return Err(TilawaError::resource_load(format!("cannot decode {resource}")));
            }
            (inner.held.get(resource).cloned(), inner.hanging.contains(resource))
        };

        if hanging {
            std::future::pending::<()>().await;
        }
        if let Some(notify) = held {
            notify.notified().await;
        }

        let handle = RenderHandle(self.next_handle.fetch_add(1, Ordering::SeqCst) + 1);
        self.inner
            .lock()
            .unwrap()
            .resources
            .insert(handle, resource.to_string());
        Ok(handle)
    }

    async fn play(&self, handle: RenderHandle) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let resource = inner
            .resources
            .get(&handle)
            .cloned()
            .ok_or_else(|| TilawaError::renderer(format!("unknown {handle}")))?;
        inner.playing.push(handle);
        inner.played.push(resource);
        Ok(())
    }

    async fn stop(&self, handle: RenderHandle) -> Result<()> {
        self.inner.lock().unwrap().playing.retain(|h| *h != handle);
        Ok(())
    }

    async fn release(&self, handle: RenderHandle) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.playing.retain(|h| *h != handle);
        inner.released.push(handle);
        Ok(())
    }

    async fn set_rate(&self, handle: RenderHandle, rate: f32) -> Result<()> {
        self.inner.lock().unwrap().rates.insert(handle, rate);
        Ok(())
    }

    fn on_completion(&self, handle: RenderHandle) -> CompletionSignal {
        let (tx, rx) = oneshot::channel();
        self.inner.lock().unwrap().completions.insert(handle, tx);
        rx
    }
}

pub fn verses(count: usize) -> Playlist {
    Playlist::from_resources((1..=count).map(|ayah| format!("https://cdn.test/001{ayah:03}.mp3")))
}

pub fn verse(ayah: usize) -> String {
    format!("https://cdn.test/001{ayah:03}.mp3")
}

/// Wait (bounded) until the state satisfies `predicate`
pub async fn wait_for_state(
    rx: &mut watch::Receiver<PlaybackState>,
    predicate: impl FnMut(&PlaybackState) -> bool,
) -> PlaybackState {
    let state = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(predicate))
        .await
        .expect("timed out waiting for playback state")
        .expect("controller dropped");
    *state
}

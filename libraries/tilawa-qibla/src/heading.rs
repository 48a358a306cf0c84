//! Shared compass heading
//!
//! The device has one magnetometer but several consumers may want headings at
//! the same time (compass screen, a widget, tests). [`HeadingHub`] owns the
//! single platform subscription and fans the latest sample out through a
//! watch channel. Consumers hold a [`HeadingSubscription`] guard; the platform
//! stream is subscribed when the first guard is created and unsubscribed when
//! the last one is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tilawa_core::{HeadingSample, HeadingStream, Result, SubscriptionId};
use tokio::sync::watch;
use tracing::debug;

/// Sampling cadence requested from the platform stream
pub const DEFAULT_HEADING_INTERVAL: Duration = Duration::from_millis(500);

struct HubState {
    consumers: usize,
    subscription: Option<SubscriptionId>,
}

struct HubInner {
    stream: Arc<dyn HeadingStream>,
    interval: Duration,
    latest: Arc<watch::Sender<Option<HeadingSample>>>,
    /// Bumped whenever a platform subscription starts or ends
    generation: Arc<AtomicU64>,
    state: Mutex<HubState>,
}

/// Reference-counted fan-out over one [`HeadingStream`]
#[derive(Clone)]
pub struct HeadingHub {
    inner: Arc<HubInner>,
}

impl HeadingHub {
    pub fn new(stream: Arc<dyn HeadingStream>) -> Self {
        Self::with_interval(stream, DEFAULT_HEADING_INTERVAL)
    }

    pub fn with_interval(stream: Arc<dyn HeadingStream>, interval: Duration) -> Self {
        let (latest, _rx) = watch::channel(None);
        Self {
            inner: Arc::new(HubInner {
                stream,
                interval,
                latest: Arc::new(latest),
                generation: Arc::new(AtomicU64::new(0)),
                state: Mutex::new(HubState {
                    consumers: 0,
                    subscription: None,
                }),
            }),
        }
    }

    /// Start receiving headings
    ///
    /// # Errors
    /// Propagates the platform error when the first subscription fails; the
    /// hub stays unsubscribed in that case.
    pub fn acquire(&self) -> Result<HeadingSubscription> {
        let mut state = self
            .inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if state.consumers == 0 {
            self.inner.stream.set_update_interval(self.inner.interval);
            let latest = Arc::clone(&self.inner.latest);
            let current = Arc::clone(&self.inner.generation);
            let generation = current.fetch_add(1, Ordering::SeqCst) + 1;
            let id = self.inner.stream.subscribe(Box::new(move |sample| {
                // checked under the channel lock so a retiring drop cannot interleave
                latest.send_if_modified(|slot| {
                    if current.load(Ordering::SeqCst) != generation {
                        debug!(generation, "Dropping heading from retired subscription");
                        return false;
                    }
                    *slot = Some(sample);
                    true
                });
            }))?;
            debug!(subscription = id.0, generation, "Subscribed to heading stream");
            state.subscription = Some(id);
        }
        state.consumers += 1;

        Ok(HeadingSubscription {
            hub: Arc::clone(&self.inner),
            rx: self.inner.latest.subscribe(),
        })
    }

    /// Number of live guards
    pub fn consumers(&self) -> usize {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .consumers
    }

    /// Whether the platform stream is currently subscribed
    pub fn is_active(&self) -> bool {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .subscription
            .is_some()
    }
}

impl std::fmt::Debug for HeadingHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadingHub")
            .field("interval", &self.inner.interval)
            .field("consumers", &self.consumers())
            .finish()
    }
}

/// Scoped access to the latest heading
///
/// Dropping the guard releases its share of the platform subscription.
pub struct HeadingSubscription {
    hub: Arc<HubInner>,
    rx: watch::Receiver<Option<HeadingSample>>,
}

impl HeadingSubscription {
    /// Most recent sample, if one has arrived yet
    pub fn latest(&self) -> Option<HeadingSample> {
        *self.rx.borrow()
    }

    /// Wait for a sample newer than the last one seen through this guard
    ///
    /// Intermediate samples are skipped; only the newest is returned.
    pub async fn changed(&mut self) -> Option<HeadingSample> {
        loop {
            self.rx.changed().await.ok()?;
            if let Some(sample) = *self.rx.borrow_and_update() {
                return Some(sample);
            }
        }
    }
}

impl Drop for HeadingSubscription {
    fn drop(&mut self) {
        let mut state = self
            .hub
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        state.consumers = state.consumers.saturating_sub(1);

        if state.consumers == 0 {
            if let Some(id) = state.subscription.take() {
                self.hub.generation.fetch_add(1, Ordering::SeqCst);
                self.hub.stream.unsubscribe(id);
                // next session must not see this session's last heading
                self.hub.latest.send_replace(None);
                debug!(subscription = id.0, "Unsubscribed from heading stream");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tilawa_core::HeadingCallback;

    #[derive(Default)]
    struct RecordingStream {
        next_id: AtomicU64,
        subscribes: AtomicUsize,
        unsubscribes: AtomicUsize,
        callback: Mutex<Option<HeadingCallback>>,
        /// Callbacks kept after unsubscribe, as some platforms deliver late
        retired: Mutex<Vec<HeadingCallback>>,
    }

    impl RecordingStream {
        fn emit(&self, degrees: f64) {
            if let Some(callback) = self.callback.lock().unwrap().as_ref() {
                callback(HeadingSample::new(degrees).unwrap());
            }
        }

        fn emit_late(&self, degrees: f64) {
            for callback in self.retired.lock().unwrap().iter() {
                callback(HeadingSample::new(degrees).unwrap());
            }
        }
    }

    impl HeadingStream for RecordingStream {
        fn subscribe(&self, callback: HeadingCallback) -> Result<SubscriptionId> {
            self.subscribes.fetch_add(1, Ordering::SeqCst);
            *self.callback.lock().unwrap() = Some(callback);
            Ok(SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst)))
        }

        fn unsubscribe(&self, _id: SubscriptionId) {
            self.unsubscribes.fetch_add(1, Ordering::SeqCst);
            if let Some(callback) = self.callback.lock().unwrap().take() {
                self.retired.lock().unwrap().push(callback);
            }
        }
    }

    #[test]
    fn subscribes_once_for_many_consumers() {
        let stream = Arc::new(RecordingStream::default());
        let hub = HeadingHub::new(stream.clone());

        let first = hub.acquire().unwrap();
        let second = hub.acquire().unwrap();
        assert_eq!(hub.consumers(), 2);
        assert_eq!(stream.subscribes.load(Ordering::SeqCst), 1);

        drop(first);
        assert!(hub.is_active());
        assert_eq!(stream.unsubscribes.load(Ordering::SeqCst), 0);

        drop(second);
        assert!(!hub.is_active());
        assert_eq!(stream.unsubscribes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn only_latest_sample_is_kept() {
        let stream = Arc::new(RecordingStream::default());
        let hub = HeadingHub::new(stream.clone());
        let guard = hub.acquire().unwrap();

        assert!(guard.latest().is_none());
        stream.emit(10.0);
        stream.emit(20.0);
        stream.emit(-30.0);
        assert_eq!(guard.latest().unwrap().heading_degrees, 330.0);
    }

    #[test]
    fn new_session_starts_empty() {
        let stream = Arc::new(RecordingStream::default());
        let hub = HeadingHub::new(stream.clone());

        let guard = hub.acquire().unwrap();
        stream.emit(42.0);
        drop(guard);

        let guard = hub.acquire().unwrap();
        assert!(guard.latest().is_none());
        assert_eq!(stream.subscribes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn late_sample_from_retired_subscription_is_ignored() {
        let stream = Arc::new(RecordingStream::default());
        let hub = HeadingHub::new(stream.clone());

        let guard = hub.acquire().unwrap();
        stream.emit(42.0);
        drop(guard);
        stream.emit_late(123.0);

        let guard = hub.acquire().unwrap();
        assert!(guard.latest().is_none());

        stream.emit(10.0);
        stream.emit_late(200.0);
        assert_eq!(guard.latest().unwrap().heading_degrees, 10.0);
    }

    #[tokio::test]
    async fn changed_returns_newest() {
        let stream = Arc::new(RecordingStream::default());
        let hub = HeadingHub::new(stream.clone());
        let mut guard = hub.acquire().unwrap();

        stream.emit(90.0);
        let sample = guard.changed().await.unwrap();
        assert_eq!(sample.heading_degrees, 90.0);
    }
}

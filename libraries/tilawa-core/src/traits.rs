/// Platform collaborator traits
///
/// The core never talks to device hardware directly. Mobile shells provide
/// adapters for these traits (GPS, magnetometer, media player, key-value
/// storage) and tests provide fakes.
use crate::error::Result;
use crate::types::{DailyReminder, GeoPoint, HeadingSample};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::oneshot;

/// Opaque identifier of a resource loaded into the audio renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u64);

impl std::fmt::Display for RenderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "render#{}", self.0)
    }
}

/// Identifier returned by [`HeadingStream::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Fires once when a loaded resource finishes playing naturally
///
/// The renderer drops the sender without sending when the resource is
/// stopped or released, so a receiver that errors means "no completion".
pub type CompletionSignal = oneshot::Receiver<()>;

/// Callback invoked by the heading stream for every new sample
pub type HeadingCallback = Box<dyn Fn(HeadingSample) + Send + Sync>;

/// One-shot device position lookup
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Current position of the device
    ///
    /// # Errors
    /// `PermissionDenied` if the user refused location access,
    /// `PositionUnavailable` if no fix could be obtained
    async fn current_position(&self) -> Result<GeoPoint>;
}

/// Continuous compass heading source
pub trait HeadingStream: Send + Sync {
    /// Start delivering samples to `callback`
    fn subscribe(&self, callback: HeadingCallback) -> Result<SubscriptionId>;

    /// Stop delivering samples for `id`
    fn unsubscribe(&self, id: SubscriptionId);

    /// Request a sampling cadence; sources without one ignore it
    fn set_update_interval(&self, interval: Duration) {
        let _ = interval;
    }
}

/// Remote audio playback engine
///
/// One handle corresponds to one loaded resource. Every call is asynchronous
/// with respect to the caller.
#[async_trait]
pub trait AudioRenderer: Send + Sync {
    /// Fetch and prepare `resource` for playback
    ///
    /// # Errors
    /// `ResourceLoad` if the resource cannot be fetched or decoded
    async fn load(&self, resource: &str) -> Result<RenderHandle>;

    /// Start rendering a loaded resource
    async fn play(&self, handle: RenderHandle) -> Result<()>;

    /// Stop rendering without releasing
    async fn stop(&self, handle: RenderHandle) -> Result<()>;

    /// Free the resource; the handle is invalid afterwards
    async fn release(&self, handle: RenderHandle) -> Result<()>;

    /// Change the playback rate, pitch-corrected where supported
    async fn set_rate(&self, handle: RenderHandle, rate: f32) -> Result<()>;

    /// Single-shot signal for natural completion of `handle`
    fn on_completion(&self, handle: RenderHandle) -> CompletionSignal;
}

/// Local notification scheduler
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Schedule `reminder` to repeat daily, replacing any earlier one
    async fn schedule_daily(&self, reminder: &DailyReminder) -> Result<()>;

    /// Cancel the daily reminder; cancelling when none is scheduled is not an error
    async fn cancel_daily(&self) -> Result<()>;
}

/// Persistent key-value storage (last write wins)
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Removing a missing key is not an error
    async fn delete(&self, key: &str) -> Result<()>;
}

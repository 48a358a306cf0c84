//! Platform adapters for a terminal
//!
//! A terminal has no GPS or magnetometer, so position and heading come from
//! the command line. Reminders are logged instead of shown by the system.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tilawa_core::{
    DailyReminder, GeoPoint, HeadingCallback, HeadingSample, HeadingStream, LocationProvider,
    Notifier, Result, SubscriptionId, TilawaError,
};
use tracing::{debug, info};

/// Location provider reporting a fixed position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    position: Option<GeoPoint>,
}

impl FixedLocation {
    pub fn new(position: GeoPoint) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// Provider that never has a fix
    pub fn unavailable() -> Self {
        Self { position: None }
    }
}

#[async_trait::async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<GeoPoint> {
        self.position
            .ok_or_else(|| TilawaError::position_unavailable("no position given"))
    }
}

/// Heading stream reporting one fixed heading
///
/// Each subscriber receives the heading immediately on subscribe.
#[derive(Debug)]
pub struct FixedHeading {
    heading: HeadingSample,
    next_id: AtomicU64,
    interval: Mutex<Option<Duration>>,
}

impl FixedHeading {
    /// # Errors
    /// Returns `InvalidArgument` for a non-finite heading
    pub fn new(heading_degrees: f64) -> Result<Self> {
        Ok(Self {
            heading: HeadingSample::new(heading_degrees)?,
            next_id: AtomicU64::new(1),
            interval: Mutex::new(None),
        })
    }

    /// Interval requested by the last subscriber, if any
    pub fn requested_interval(&self) -> Option<Duration> {
        *self
            .interval
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl HeadingStream for FixedHeading {
    fn subscribe(&self, callback: HeadingCallback) -> Result<SubscriptionId> {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        callback(self.heading);
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        debug!(subscription = id.0, "Fixed heading unsubscribed");
    }

    fn set_update_interval(&self, interval: Duration) {
        *self
            .interval
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(interval);
    }
}

/// Notifier that logs instead of posting system notifications
#[derive(Debug, Default)]
pub struct LogNotifier {
    scheduled: Mutex<Option<DailyReminder>>,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reminder currently scheduled, if any
    pub fn scheduled(&self) -> Option<DailyReminder> {
        self.scheduled
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn schedule_daily(&self, reminder: &DailyReminder) -> Result<()> {
        info!(
            title = %reminder.title,
            hour = reminder.hour,
            minute = reminder.minute,
            "Daily reminder"
        );
        *self
            .scheduled
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(reminder.clone());
        Ok(())
    }

    async fn cancel_daily(&self) -> Result<()> {
        *self
            .scheduled
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn fixed_location_reports_position() {
        let mecca = GeoPoint::new(21.4225, 39.8262).unwrap();
        assert_eq!(FixedLocation::new(mecca).current_position().await.unwrap(), mecca);
        assert!(matches!(
            FixedLocation::unavailable().current_position().await,
            Err(TilawaError::PositionUnavailable(_))
        ));
    }

    #[test]
    fn fixed_heading_delivers_on_subscribe() {
        let stream = FixedHeading::new(370.0).unwrap();
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);

        stream.set_update_interval(Duration::from_millis(250));
        stream
            .subscribe(Box::new(move |sample| *sink.lock().unwrap() = Some(sample)))
            .unwrap();

        let sample = seen.lock().unwrap().unwrap();
        assert!((sample.heading_degrees - 10.0).abs() < 1e-9);
        assert_eq!(stream.requested_interval(), Some(Duration::from_millis(250)));
    }

    #[tokio::test]
    async fn log_notifier_replaces_and_cancels() {
        let notifier = LogNotifier::new();
        notifier
            .schedule_daily(&DailyReminder::new("first", ""))
            .await
            .unwrap();
        notifier
            .schedule_daily(&DailyReminder::new("second", ""))
            .await
            .unwrap();
        assert_eq!(notifier.scheduled().unwrap().title, "second");

        notifier.cancel_daily().await.unwrap();
        assert!(notifier.scheduled().is_none());
    }

    #[test]
    fn fixed_heading_rejects_nan() {
        assert!(matches!(
            FixedHeading::new(f64::NAN),
            Err(TilawaError::InvalidArgument(_))
        ));
    }
}

//! User preferences
//!
//! Typed accessors over a [`KeyValueStore`]. Each preference lives under its
//! own key as a JSON value. A value that cannot be decoded (hand-edited file,
//! older format) reads as unset and falls back to the default; only backend
//! failures are errors.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tilawa_core::Theme;
//! use tilawa_storage::{MemoryStore, Preferences};
//!
//! # async fn example() -> tilawa_storage::Result<()> {
//! let prefs = Preferences::new(Arc::new(MemoryStore::new()));
//!
//! prefs.set_theme(Theme::Dark).await?;
//! assert_eq!(prefs.theme().await?, Theme::Dark);
//!
//! prefs.add_recent_search("al-kahf").await?;
//! assert_eq!(prefs.recent_searches().await?, vec!["al-kahf".to_string()]);
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tilawa_core::{DailyReminder, KeyValueStore, Notifier, Settings, Theme};
use tracing::{debug, info, warn};

// Preference keys
pub const KEY_THEME: &str = "theme";
pub const KEY_FONT_SIZE: &str = "fontSize";
pub const KEY_PLAYBACK_RATE: &str = "playbackRate";
pub const KEY_RECITER: &str = "reciter";
pub const KEY_TRANSLATION: &str = "translation";
pub const KEY_NOTIFICATIONS_ENABLED: &str = "notificationsEnabled";
pub const KEY_ONBOARDING_COMPLETED: &str = "onboardingCompleted";
pub const KEY_RECENT_SEARCHES: &str = "recentSearches";

/// Most recent searches kept
pub const RECENT_SEARCH_LIMIT: usize = 10;

/// Typed preference access
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Decode `key`, treating undecodable values as unset
    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(bytes) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "Ignoring undecodable preference");
                Ok(None)
            }
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.store.set(key, serde_json::to_vec(value)?).await?;
        debug!(key, "Saved preference");
        Ok(())
    }

    // ===== Appearance =====

    pub async fn theme(&self) -> Result<Theme> {
        Ok(self.read(KEY_THEME).await?.unwrap_or_default())
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<()> {
        self.write(KEY_THEME, &theme).await
    }

    /// Flip light/dark, persist, and return the new theme
    pub async fn toggle_theme(&self) -> Result<Theme> {
        let theme = self.theme().await?.toggle();
        self.set_theme(theme).await?;
        Ok(theme)
    }

    pub async fn font_size(&self) -> Result<u8> {
        Ok(self
            .read(KEY_FONT_SIZE)
            .await?
            .unwrap_or(Settings::default().font_size))
    }

    pub async fn set_font_size(&self, size: u8) -> Result<()> {
        self.write(KEY_FONT_SIZE, &size).await
    }

    // ===== Recitation =====

    pub async fn playback_rate(&self) -> Result<f32> {
        self.playback_rate_or(Settings::default().playback_rate)
            .await
    }

    /// Stored playback rate, or `fallback` when unset
    ///
    /// Non-positive stored values read as unset.
    pub async fn playback_rate_or(&self, fallback: f32) -> Result<f32> {
        let rate = self
            .read::<f32>(KEY_PLAYBACK_RATE)
            .await?
            .filter(|rate| rate.is_finite() && *rate > 0.0);
        Ok(rate.unwrap_or(fallback))
    }

    pub async fn set_playback_rate(&self, rate: f32) -> Result<()> {
        self.write(KEY_PLAYBACK_RATE, &rate).await
    }

    /// Audio edition identifier, e.g. `ar.alafasy`
    pub async fn reciter(&self) -> Result<String> {
        Ok(self
            .read(KEY_RECITER)
            .await?
            .unwrap_or_else(|| Settings::default().reciter))
    }

    pub async fn set_reciter(&self, edition: &str) -> Result<()> {
        self.write(KEY_RECITER, edition).await
    }

    /// Translation edition identifier, e.g. `en.sahih`
    pub async fn translation(&self) -> Result<String> {
        Ok(self
            .read(KEY_TRANSLATION)
            .await?
            .unwrap_or_else(|| Settings::default().translation))
    }

    pub async fn set_translation(&self, edition: &str) -> Result<()> {
        self.write(KEY_TRANSLATION, edition).await
    }

    // ===== App state =====

    pub async fn notifications_enabled(&self) -> Result<bool> {
        Ok(self.read(KEY_NOTIFICATIONS_ENABLED).await?.unwrap_or(false))
    }

    pub async fn set_notifications_enabled(&self, enabled: bool) -> Result<()> {
        self.write(KEY_NOTIFICATIONS_ENABLED, &enabled).await
    }

    /// Bring the daily reminder in line with the stored switch
    ///
    /// Schedules `reminder` when notifications are enabled and cancels any
    /// scheduled one otherwise. Returns whether a reminder is now scheduled.
    pub async fn sync_daily_reminder(
        &self,
        notifier: &dyn Notifier,
        reminder: &DailyReminder,
    ) -> Result<bool> {
        if self.notifications_enabled().await? {
            notifier.schedule_daily(reminder).await?;
            info!(hour = reminder.hour, minute = reminder.minute, "Daily reminder scheduled");
            Ok(true)
        } else {
            notifier.cancel_daily().await?;
            debug!("Daily reminder cancelled");
            Ok(false)
        }
    }

    pub async fn onboarding_completed(&self) -> Result<bool> {
        Ok(self.read(KEY_ONBOARDING_COMPLETED).await?.unwrap_or(false))
    }

    pub async fn set_onboarding_completed(&self, completed: bool) -> Result<()> {
        self.write(KEY_ONBOARDING_COMPLETED, &completed).await
    }

    /// Recent searches, most recent first
    pub async fn recent_searches(&self) -> Result<Vec<String>> {
        Ok(self.read(KEY_RECENT_SEARCHES).await?.unwrap_or_default())
    }

    /// Record a search and return the updated list
    ///
    /// Blank queries are ignored. A repeated query moves to the front instead
    /// of appearing twice; the list is capped at [`RECENT_SEARCH_LIMIT`].
    pub async fn add_recent_search(&self, query: &str) -> Result<Vec<String>> {
        let mut searches = self.recent_searches().await?;
        let query = query.trim();
        if query.is_empty() {
            return Ok(searches);
        }

        searches.retain(|existing| existing != query);
        searches.insert(0, query.to_string());
        searches.truncate(RECENT_SEARCH_LIMIT);

        self.write(KEY_RECENT_SEARCHES, &searches).await?;
        Ok(searches)
    }

    pub async fn clear_recent_searches(&self) -> Result<()> {
        self.store.delete(KEY_RECENT_SEARCHES).await?;
        Ok(())
    }

    // ===== Settings =====

    /// Settings as persisted, with defaults for anything unset
    ///
    /// The reading selection is session state and is never persisted.
    pub async fn load_settings(&self) -> Result<Settings> {
        Ok(Settings {
            theme: self.theme().await?,
            translation: self.translation().await?,
            reciter: self.reciter().await?,
            font_size: self.font_size().await?,
            playback_rate: self.playback_rate().await?,
            notifications_enabled: self.notifications_enabled().await?,
            selection: None,
        })
    }

    /// Persist every preference carried by `settings`
    pub async fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.set_theme(settings.theme).await?;
        self.set_translation(&settings.translation).await?;
        self.set_reciter(&settings.reciter).await?;
        self.set_font_size(settings.font_size).await?;
        self.set_playback_rate(settings.playback_rate).await?;
        self.set_notifications_enabled(settings.notifications_enabled)
            .await
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}

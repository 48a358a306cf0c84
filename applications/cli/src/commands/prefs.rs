/// Preference management
use crate::error::{CliError, Result};
use std::io::Write;
use chrono::Local;
use tilawa_core::{DailyReminder, Notifier, Theme, PLAYBACK_RATES};
use tilawa_storage::Preferences;
use tracing::warn;

pub async fn show(prefs: &Preferences, out: &mut impl Write) -> Result<()> {
    let settings = prefs.load_settings().await?;
    writeln!(out, "theme:          {}", settings.theme)?;
    writeln!(out, "font size:      {}", settings.font_size)?;
    writeln!(out, "playback rate:  {}x", settings.playback_rate)?;
    writeln!(out, "reciter:        {}", settings.reciter)?;
    writeln!(out, "translation:    {}", settings.translation)?;
    writeln!(out, "notifications:  {}", on_off(settings.notifications_enabled))?;
    writeln!(out, "onboarded:      {}", on_off(prefs.onboarding_completed().await?))?;

    let searches = prefs.recent_searches().await?;
    if !searches.is_empty() {
        writeln!(out, "recent searches: {}", searches.join(", "))?;
    }
    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

pub async fn toggle_theme(prefs: &Preferences, out: &mut impl Write) -> Result<Theme> {
    let theme = prefs.toggle_theme().await?;
    writeln!(out, "Theme set to {theme}")?;
    Ok(theme)
}

/// Store a playback rate; values outside the player presets are kept with a warning
pub async fn set_rate(prefs: &Preferences, rate: f32, out: &mut impl Write) -> Result<()> {
    if !(rate.is_finite() && rate > 0.0) {
        return Err(CliError::BadRequest(format!(
            "playback rate must be positive, got {rate}"
        )));
    }
    if !PLAYBACK_RATES.contains(&rate) {
        warn!(rate, presets = ?PLAYBACK_RATES, "Rate is not one of the player presets");
    }
    prefs.set_playback_rate(rate).await?;
    writeln!(out, "Playback rate set to {rate}x")?;
    Ok(())
}

pub async fn set_reciter(prefs: &Preferences, edition: &str, out: &mut impl Write) -> Result<()> {
    let edition = require_edition(edition)?;
    prefs.set_reciter(edition).await?;
    writeln!(out, "Reciter set to {edition}")?;
    Ok(())
}

pub async fn set_translation(
    prefs: &Preferences,
    edition: &str,
    out: &mut impl Write,
) -> Result<()> {
    let edition = require_edition(edition)?;
    prefs.set_translation(edition).await?;
    writeln!(out, "Translation set to {edition}")?;
    Ok(())
}

/// Turn the daily reminder on or off and reschedule it accordingly
pub async fn set_notifications(
    prefs: &Preferences,
    enabled: bool,
    notifier: &dyn Notifier,
    out: &mut impl Write,
) -> Result<bool> {
    prefs.set_notifications_enabled(enabled).await?;
    let reminder = DailyReminder::new("Daily Ayah", "Open Tilawa for today's verse");
    let scheduled = prefs.sync_daily_reminder(notifier, &reminder).await?;

    if scheduled {
        write!(out, "Daily reminder on at {:02}:{:02}", reminder.hour, reminder.minute)?;
        match reminder.next_after(Local::now().naive_local()) {
            Some(next) => writeln!(out, ", next {}", next.format("%Y-%m-%d %H:%M"))?,
            None => writeln!(out)?,
        }
    } else {
        writeln!(out, "Daily reminder off")?;
    }
    Ok(scheduled)
}

fn require_edition(edition: &str) -> Result<&str> {
    let edition = edition.trim();
    if edition.is_empty() {
        return Err(CliError::BadRequest(
            "edition identifier must not be empty".to_string(),
        ));
    }
    Ok(edition)
}

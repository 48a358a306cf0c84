//! Explicit application context
//!
//! Settings every screen reads (theme, editions, current selection) live in
//! one handle that is passed to whoever needs it. Writers go through
//! [`AppContext::update`]; readers either take a snapshot or hold a watch
//! receiver and react to changes.

use crate::types::{Selection, Settings, Theme};
use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable handle to the shared settings
#[derive(Debug, Clone)]
pub struct AppContext {
    tx: Arc<watch::Sender<Settings>>,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        let (tx, _rx) = watch::channel(settings);
        Self { tx: Arc::new(tx) }
    }

    /// Copy of the current settings
    pub fn snapshot(&self) -> Settings {
        self.tx.borrow().clone()
    }

    /// Apply `f` to the settings
    ///
    /// Subscribers are only notified when `f` actually changed something.
    /// Returns whether a change was published.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Settings),
    {
        self.tx.send_if_modified(|settings| {
            let before = settings.clone();
            f(settings);
            *settings != before
        })
    }

    /// Receiver that always holds the latest settings
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.tx.subscribe()
    }

    pub fn set_selection(&self, selection: Option<Selection>) -> bool {
        self.update(|settings| settings.selection = selection)
    }

    /// Flip light/dark and return the new theme
    pub fn toggle_theme(&self) -> Theme {
        let mut theme = Theme::Light;
        self.update(|settings| {
            settings.theme = settings.theme.toggle();
            theme = settings.theme;
        });
        theme
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

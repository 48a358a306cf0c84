/// Application-wide settings shared by every screen
use super::content::{JUZ_COUNT, SURAH_COUNT};
use crate::error::{Result, TilawaError};
use serde::{Deserialize, Serialize};

/// Speed presets offered by the player
pub const PLAYBACK_RATES: [f32; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Default audio edition
pub const DEFAULT_RECITER: &str = "ar.alafasy";

/// Default translation edition
pub const DEFAULT_TRANSLATION: &str = "en.sahih";

/// Default verse font size
pub const DEFAULT_FONT_SIZE: u8 = 18;

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which kind of reading unit is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Surah,
    Juz,
}

/// The surah or juz currently open in the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub kind: SelectionKind,
    pub number: u16,
}

impl Selection {
    /// # Errors
    /// Returns `InvalidArgument` unless `number` is in 1..=114
    pub fn surah(number: u16) -> Result<Self> {
        Self::checked(SelectionKind::Surah, number, SURAH_COUNT)
    }

    /// # Errors
    /// Returns `InvalidArgument` unless `number` is in 1..=30
    pub fn juz(number: u16) -> Result<Self> {
        Self::checked(SelectionKind::Juz, number, u16::from(JUZ_COUNT))
    }

    fn checked(kind: SelectionKind, number: u16, count: u16) -> Result<Self> {
        if !(1..=count).contains(&number) {
            return Err(TilawaError::invalid_argument(format!(
                "{kind:?} {number} outside 1..={count}"
            )));
        }
        Ok(Self { kind, number })
    }
}

/// Snapshot of the shared application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,

    /// Translation edition identifier
    pub translation: String,

    /// Audio edition identifier
    pub reciter: String,

    pub font_size: u8,

    pub playback_rate: f32,

    pub notifications_enabled: bool,

    /// Reading unit currently open, if any
    pub selection: Option<Selection>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            translation: DEFAULT_TRANSLATION.to_string(),
            reciter: DEFAULT_RECITER.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            playback_rate: 1.0,
            notifications_enabled: false,
            selection: None,
        }
    }
}

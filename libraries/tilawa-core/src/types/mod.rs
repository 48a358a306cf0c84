mod bookmark;
mod content;
mod geo;
mod playlist;
mod reminder;
mod settings;

pub use bookmark::Bookmark;
pub use content::{
    filter_by_query, Ayah, Juz, Reciter, Searchable, Surah, SurahRef, JUZ_COUNT, SURAH_COUNT,
};
pub use geo::{normalize_degrees, BearingResult, GeoPoint, HeadingSample};
pub use playlist::{Playlist, PlaylistTrack};
pub use reminder::{DailyReminder, DAILY_REMINDER_HOUR};
pub use settings::{
    Selection, SelectionKind, Settings, Theme, DEFAULT_FONT_SIZE, DEFAULT_RECITER,
    DEFAULT_TRANSLATION, PLAYBACK_RATES,
};

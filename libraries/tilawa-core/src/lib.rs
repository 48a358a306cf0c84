//! Tilawa Core
//!
//! Platform-agnostic core types, collaborator traits, and error handling for
//! Tilawa, a Quran reading and recitation companion.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `GeoPoint`, `HeadingSample`, `Playlist`, `Ayah`, `Settings`, etc.
//! - **Collaborator Traits**: `LocationProvider`, `HeadingStream`, `AudioRenderer`, `KeyValueStore`, `Notifier`
//! - **Application Context**: an explicitly passed settings handle with change notification
//! - **Error Handling**: Unified `TilawaError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tilawa_core::{AppContext, GeoPoint, Playlist, Selection};
//!
//! let observer = GeoPoint::new(40.7128, -74.0060).unwrap();
//! let playlist = Playlist::from_resources(["https://cdn.example/1.mp3"]);
//! assert!(observer.validate().is_ok());
//! assert_eq!(playlist.len(), 1);
//!
//! let context = AppContext::default();
//! context.set_selection(Some(Selection::surah(1).unwrap()));
//! assert_eq!(context.snapshot().selection, Some(Selection::surah(1).unwrap()));
//! ```

#![forbid(unsafe_code)]

pub mod context;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use context::AppContext;
pub use error::{Result, TilawaError};
pub use traits::{
    AudioRenderer, CompletionSignal, HeadingCallback, HeadingStream, KeyValueStore,
    LocationProvider, Notifier, RenderHandle, SubscriptionId,
};
pub use types::{
    filter_by_query, Ayah, BearingResult, Bookmark, DailyReminder, GeoPoint, HeadingSample, Juz,
    Playlist, PlaylistTrack, Reciter, Searchable, Selection, SelectionKind, Settings, Surah,
    Theme, PLAYBACK_RATES,
};

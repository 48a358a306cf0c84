//! Tilawa Storage
//!
//! Persistence for Tilawa on top of the [`KeyValueStore`](tilawa_core::KeyValueStore)
//! trait.
//!
//! # Backends
//!
//! - [`MemoryStore`]: in-process map, for tests and ephemeral sessions
//! - [`FileStore`]: one JSON document on disk, replaced atomically on every write
//!
//! # Typed layers
//!
//! - [`Preferences`]: theme, font size, editions, playback rate, recent searches,
//!   daily reminder switch
//! - [`Bookmarks`]: saved verses in insertion order
//! - [`ContentCache`]: offline copies of surah and juz content
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tilawa_core::Bookmark;
//! use tilawa_storage::{Bookmarks, FileStore};
//!
//! # async fn example() -> tilawa_storage::Result<()> {
//! let store = Arc::new(FileStore::open("./data/tilawa.json").await?);
//! let bookmarks = Bookmarks::new(store);
//!
//! bookmarks
//!     .add(Bookmark::new(1, 1, "بِسْمِ ٱللَّهِ", "In the name of Allah", None))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod bookmarks;
pub mod cache;
pub mod error;
pub mod file;
pub mod memory;
pub mod preferences;

pub use bookmarks::Bookmarks;
pub use cache::{CachedJuz, CachedSurah, ContentCache, JuzText};
pub use error::{Result, StorageError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use preferences::Preferences;

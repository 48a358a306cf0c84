//! Subcommand handlers
//!
//! Each handler takes its collaborators and an output sink so it can be driven
//! from `main` or from tests.

pub mod bookmarks;
pub mod juz;
pub mod prefs;
pub mod qibla;
pub mod recite;

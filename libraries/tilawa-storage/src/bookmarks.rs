//! Bookmarked verses
//!
//! All bookmarks live under one key as a JSON array in insertion order.
//! Positions in [`Bookmarks::list`] are what [`Bookmarks::remove`] takes.

use crate::error::Result;
use std::sync::Arc;
use tilawa_core::{Bookmark, KeyValueStore};
use tracing::{info, warn};

/// Store key holding the bookmark array
pub const KEY_BOOKMARKS: &str = "bookmarks";

/// Bookmark list persisted in a [`KeyValueStore`]
#[derive(Clone)]
pub struct Bookmarks {
    store: Arc<dyn KeyValueStore>,
}

impl Bookmarks {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// All bookmarks, oldest first
    ///
    /// An undecodable array reads as empty.
    pub async fn list(&self) -> Result<Vec<Bookmark>> {
        let Some(bytes) = self.store.get(KEY_BOOKMARKS).await? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring undecodable bookmark list");
            Vec::new()
        }))
    }

    async fn save(&self, bookmarks: &[Bookmark]) -> Result<()> {
        self.store
            .set(KEY_BOOKMARKS, serde_json::to_vec(bookmarks)?)
            .await?;
        Ok(())
    }

    /// Append `bookmark` and return its position
    pub async fn add(&self, bookmark: Bookmark) -> Result<usize> {
        let mut bookmarks = self.list().await?;
        info!(reference = %bookmark.reference(), "Bookmarked ayah");
        bookmarks.push(bookmark);
        self.save(&bookmarks).await?;
        Ok(bookmarks.len() - 1)
    }

    /// Remove the bookmark at `index`
    ///
    /// Returns the removed bookmark, or `None` (store untouched) if there is
    /// nothing at that position.
    pub async fn remove(&self, index: usize) -> Result<Option<Bookmark>> {
        let mut bookmarks = self.list().await?;
        if index >= bookmarks.len() {
            return Ok(None);
        }
        let removed = bookmarks.remove(index);
        self.save(&bookmarks).await?;
        info!(reference = %removed.reference(), "Removed bookmark");
        Ok(Some(removed))
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.delete(KEY_BOOKMARKS).await?;
        Ok(())
    }
}

impl std::fmt::Debug for Bookmarks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bookmarks").finish_non_exhaustive()
    }
}

//! Offline content cache
//!
//! Surah and juz responses are cached per (number, reciter edition,
//! translation edition) so a reading unit that was opened once can be shown
//! again without a connection. Entries are never evicted.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tilawa_core::{Ayah, KeyValueStore, Surah};
use tracing::{debug, warn};

/// Cache key for a surah in the given editions
pub fn surah_key(number: u16, reciter: &str, translation: &str) -> String {
    format!("surah_{number}_{reciter}_{translation}")
}

/// Cache key for a juz in the given editions
pub fn juz_key(number: u8, reciter: &str, translation: &str) -> String {
    format!("juz_{number}_{reciter}_{translation}")
}

/// A surah in its recitation edition plus the matching translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedSurah {
    pub surah_data: Surah,
    pub surah_trans: Surah,
}

/// Verses of one juz in a single edition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JuzText {
    pub number: u8,
    pub ayahs: Vec<Ayah>,
}

/// A juz in its recitation edition plus the matching translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedJuz {
    pub juz_data: JuzText,
    pub juz_trans: JuzText,
}

/// Content cache over a [`KeyValueStore`]
#[derive(Clone)]
pub struct ContentCache {
    store: Arc<dyn KeyValueStore>,
}

impl ContentCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(bytes) = self.store.get(key).await? else {
            debug!(key, "Cache miss");
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(entry) => {
                debug!(key, "Cache hit");
                Ok(Some(entry))
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable cache entry");
                Ok(None)
            }
        }
    }

    async fn save<T: Serialize>(&self, key: &str, entry: &T) -> Result<()> {
        self.store.set(key, serde_json::to_vec(entry)?).await?;
        debug!(key, "Cached content");
        Ok(())
    }

    pub async fn surah(
        &self,
        number: u16,
        reciter: &str,
        translation: &str,
    ) -> Result<Option<CachedSurah>> {
        self.load(&surah_key(number, reciter, translation)).await
    }

    pub async fn put_surah(
        &self,
        number: u16,
        reciter: &str,
        translation: &str,
        entry: &CachedSurah,
    ) -> Result<()> {
        self.save(&surah_key(number, reciter, translation), entry).await
    }

    pub async fn juz(
        &self,
        number: u8,
        reciter: &str,
        translation: &str,
    ) -> Result<Option<CachedJuz>> {
        self.load(&juz_key(number, reciter, translation)).await
    }

    pub async fn put_juz(
        &self,
        number: u8,
        reciter: &str,
        translation: &str,
        entry: &CachedJuz,
    ) -> Result<()> {
        self.save(&juz_key(number, reciter, translation), entry).await
    }
}

impl std::fmt::Debug for ContentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentCache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_request_parameters() {
        assert_eq!(surah_key(18, "ar.alafasy", "en.sahih"), "surah_18_ar.alafasy_en.sahih");
        assert_eq!(juz_key(30, "ar.husary", "en.yusufali"), "juz_30_ar.husary_en.yusufali");
    }

    #[test]
    fn cached_surah_wire_names() {
        let json = r#"{
            "surahData": {
                "number": 1, "name": "الفاتحة", "englishName": "Al-Faatiha",
                "englishNameTranslation": "The Opening", "numberOfAyahs": 7
            },
            "surahTrans": {
                "number": 1, "name": "الفاتحة", "englishName": "Al-Faatiha",
                "englishNameTranslation": "The Opening", "numberOfAyahs": 7
            }
        }"#;
        let entry: CachedSurah = serde_json::from_str(json).unwrap();
        assert_eq!(entry.surah_data.number, 1);
        assert_eq!(entry.surah_trans.english_name, "Al-Faatiha");
    }
}

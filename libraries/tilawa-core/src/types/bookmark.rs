/// Saved verses
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A verse the reader saved for later
///
/// Stored as-is, including the text shown at the time of saving, so the
/// bookmark list renders without fetching content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub surah: u16,
    pub ayah: u32,
    pub arabic: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tafsir: Option<String>,

    /// When the bookmark was created (RFC 3339, UTC)
    pub timestamp: DateTime<Utc>,
}

impl Bookmark {
    /// Bookmark stamped with the current time
    pub fn new(
        surah: u16,
        ayah: u32,
        arabic: impl Into<String>,
        translation: impl Into<String>,
        tafsir: Option<String>,
    ) -> Self {
        Self {
            surah,
            ayah,
            arabic: arabic.into(),
            translation: translation.into(),
            tafsir,
            timestamp: Utc::now(),
        }
    }

    /// "surah:ayah" reference, e.g. `2:255`
    pub fn reference(&self) -> String {
        format!("{}:{}", self.surah, self.ayah)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_matches_saved_documents() {
        let json = r#"{
            "surah": 2,
            "ayah": 255,
            "arabic": "ٱللَّهُ لَآ إِلَٰهَ إِلَّا هُوَ",
            "translation": "Allah - there is no deity except Him",
            "timestamp": "2024-03-01T12:30:00.000Z"
        }"#;

        let bookmark: Bookmark = serde_json::from_str(json).unwrap();
        assert_eq!(bookmark.reference(), "2:255");
        assert!(bookmark.tafsir.is_none());
        assert_eq!(bookmark.timestamp.to_rfc3339(), "2024-03-01T12:30:00+00:00");

        let back = serde_json::to_value(&bookmark).unwrap();
        assert!(back.get("tafsir").is_none());
    }
}

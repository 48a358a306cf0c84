/// Quran content records as delivered by the content API
use serde::{Deserialize, Serialize};

/// Number of juz the Quran is divided into
pub const JUZ_COUNT: u8 = 30;

/// Number of surahs
pub const SURAH_COUNT: u16 = 114;

/// Short reference to the surah an ayah belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahRef {
    pub number: u16,
    pub name: String,
}

/// A single verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ayah {
    /// Absolute verse number across the whole Quran
    pub number: u32,

    /// Verse number within its surah
    pub number_in_surah: u32,

    pub text: String,

    /// Recitation URL for the selected reciter (empty for text editions)
    #[serde(default)]
    pub audio: String,

    /// Present when verses of several surahs are listed together (juz view)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surah: Option<SurahRef>,
}

/// A chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surah {
    pub number: u16,
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub number_of_ayahs: u32,
    #[serde(default)]
    pub ayahs: Vec<Ayah>,
}

/// One of the thirty recitation parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Juz {
    pub number: u8,
    pub name: String,
    #[serde(default)]
    pub arabic_name: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub ayat_count: u32,
}

impl Juz {
    /// Listing entry for juz `number`, as shown on the home screen
    pub fn listing(number: u8) -> Self {
        Self {
            number,
            name: format!("Juz {number}"),
            arabic_name: String::new(),
            meaning: format!("Part {number}"),
            ayat_count: 0,
        }
    }

    /// All thirty juz in order
    pub fn all() -> Vec<Self> {
        (1..=JUZ_COUNT).map(Self::listing).collect()
    }
}

/// Listing entries that can be narrowed by a search box
pub trait Searchable {
    /// Names the query is matched against
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match on any name
    ///
    /// A blank query matches everything.
    fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
    }
}

impl Searchable for Surah {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.english_name.as_str(),
            self.name.as_str(),
            self.english_name_translation.as_str(),
        ]
    }
}

impl Searchable for Juz {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.arabic_name.as_str(),
            self.meaning.as_str(),
        ]
    }
}

/// Entries of `items` matching `query`, in their original order
pub fn filter_by_query<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.matches(query)).collect()
}

/// An audio edition (qari)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reciter {
    /// Edition identifier, e.g. `ar.alafasy`
    pub identifier: String,
    pub english_name: String,
}

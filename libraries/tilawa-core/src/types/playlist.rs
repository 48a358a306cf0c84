/// Playlist domain types
use crate::types::Ayah;
use serde::{Deserialize, Serialize};

/// One remote audio resource in a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    /// Opaque reference handed to the audio renderer (usually a URL)
    pub resource_ref: String,

    /// Position in the playlist (0-indexed, unique)
    pub ordinal_index: usize,
}

/// Ordered, immutable sequence of tracks
///
/// Built once and handed to the playback controller as a whole; the only way
/// to change it is to replace it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    tracks: Vec<PlaylistTrack>,
}

impl Playlist {
    /// Build a playlist from resource references, assigning ordinals in order
    pub fn from_resources<I, S>(resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tracks = resources
            .into_iter()
            .enumerate()
            .map(|(ordinal_index, resource)| PlaylistTrack {
                resource_ref: resource.into(),
                ordinal_index,
            })
            .collect();
        Self { tracks }
    }

    /// Build a playlist from the verses of a loaded surah or juz
    ///
    /// Track `i` is the recitation of ayah `i`, so list positions in the
    /// reading view line up with playlist indices.
    pub fn from_ayahs(ayahs: &[Ayah]) -> Self {
        Self::from_resources(ayahs.iter().map(|ayah| ayah.audio.clone()))
    }

    /// Empty playlist ("nothing to play")
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistTrack> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[PlaylistTrack] {
        &self.tracks
    }
}

impl From<Vec<PlaylistTrack>> for Playlist {
    /// Tracks are re-numbered by position
    fn from(tracks: Vec<PlaylistTrack>) -> Self {
        Self::from_resources(tracks.into_iter().map(|track| track.resource_ref))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_position() {
        let playlist = Playlist::from_resources(["a.mp3", "b.mp3", "c.mp3"]);
        assert_eq!(playlist.len(), 3);
        for (i, track) in playlist.tracks().iter().enumerate() {
            assert_eq!(track.ordinal_index, i);
        }
        assert_eq!(playlist.get(1).unwrap().resource_ref, "b.mp3");
        assert!(playlist.get(3).is_none());
    }

    #[test]
    fn from_tracks_renumbers() {
        let playlist = Playlist::from(vec![
            PlaylistTrack {
                resource_ref: "x".to_string(),
                ordinal_index: 9,
            },
            PlaylistTrack {
                resource_ref: "y".to_string(),
                ordinal_index: 9,
            },
        ]);
        assert_eq!(playlist.get(0).unwrap().ordinal_index, 0);
        assert_eq!(playlist.get(1).unwrap().ordinal_index, 1);
    }

    #[test]
    fn from_ayahs_uses_audio_urls() {
        let ayahs = vec![
            Ayah {
                number: 1,
                number_in_surah: 1,
                text: "first".to_string(),
                audio: "https://cdn.example/1.mp3".to_string(),
                surah: None,
            },
            Ayah {
                number: 2,
                number_in_surah: 2,
                text: "second".to_string(),
                audio: "https://cdn.example/2.mp3".to_string(),
                surah: None,
            },
        ];
        let playlist = Playlist::from_ayahs(&ayahs);
        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.get(1).unwrap().resource_ref, "https://cdn.example/2.mp3");
    }

    #[test]
    fn empty_playlist() {
        assert!(Playlist::empty().is_empty());
    }
}

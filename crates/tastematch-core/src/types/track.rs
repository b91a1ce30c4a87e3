//! Track type representing a single catalog track.

use serde::{Deserialize, Serialize};

use super::Images;

/// A single track.
///
/// Duplicate ids across two users' lists denote the same track. Popularity
/// is always defined and in `[0, 100]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    /// Catalog track ID.
    pub id: String,
    /// Track name.
    pub name: String,
    /// Artist name references, in catalog order.
    pub artists: Vec<TrackArtist>,
    /// Album metadata.
    pub album: TrackAlbum,
    /// Popularity in `[0, 100]`.
    pub popularity: u8,
}

impl Track {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artists: Vec::new(),
            album: TrackAlbum::default(),
            popularity: 0,
        }
    }

    #[must_use]
    pub const fn with_popularity(mut self, popularity: u8) -> Self {
        self.popularity = popularity;
        self
    }

    #[must_use]
    pub fn with_artist(mut self, name: impl Into<String>) -> Self {
        self.artists.push(TrackArtist::new(name));
        self
    }

    /// Get the primary artist name.
    pub fn artist_name(&self) -> &str {
        self.artists.first().map_or("Unknown", |a| a.name.as_str())
    }

    /// Get all artist names joined.
    pub fn artists_display(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Get the album's primary image URL.
    pub fn album_image_url(&self) -> Option<&str> {
        self.album.images.primary_url()
    }

    /// Spotify URI for this track.
    pub fn uri(&self) -> String {
        format!("spotify:track:{}", self.id)
    }
}

/// Artist reference within a track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackArtist {
    /// Artist name.
    pub name: String,
    /// Genre tags, populated only when the provider enriched the reference.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
}

impl TrackArtist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            genres: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }
}

/// Album metadata within a track.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackAlbum {
    /// Album name.
    pub name: String,
    /// Album cover images.
    #[serde(default)]
    pub images: Images,
    /// Release date as reported by the catalog (YYYY or YYYY-MM-DD).
    #[serde(default)]
    pub release_date: Option<String>,
}

impl TrackAlbum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            images: Images::default(),
            release_date: None,
        }
    }
}

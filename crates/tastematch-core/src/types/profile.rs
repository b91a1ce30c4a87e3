//! A user's taste profile for one listening window.

use serde::{Deserialize, Serialize};

use super::{Artist, Track, TrackMetrics};

/// Identity of the user a profile belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    /// Opaque user id from the provider.
    pub id: String,
    /// Display name.
    pub display_name: String,
    /// Avatar image URL, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            avatar_url: None,
        }
    }
}

/// A user's aggregated listening signal for a given time window.
///
/// Immutable once constructed; owned by the session that requested it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TasteProfile {
    pub user: UserIdentity,
    pub top_artists: Vec<Artist>,
    pub top_tracks: Vec<Track>,
    pub track_metrics: TrackMetrics,
    /// Deduplicated genre set derived from artist genre tags, in
    /// first-encountered order.
    pub genres: Vec<String>,
}

impl TasteProfile {
    /// Assemble a profile, deriving the genre set from the artists.
    pub fn new(
        user: UserIdentity,
        top_artists: Vec<Artist>,
        top_tracks: Vec<Track>,
        track_metrics: TrackMetrics,
    ) -> Self {
        let genres = unique_genres(&top_artists);
        Self {
            user,
            top_artists,
            top_tracks,
            track_metrics,
            genres,
        }
    }
}

/// Deduplicated genre tags across a list of artists, preserving
/// first-encountered order.
pub fn unique_genres(artists: &[Artist]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut genres = Vec::new();
    for artist in artists {
        for genre in &artist.genres {
            if seen.insert(genre.as_str()) {
                genres.push(genre.clone());
            }
        }
    }
    genres
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_genres_order() {
        let artists = vec![
            Artist::new("a1", "A").with_genres(["rock", "indie"]),
            Artist::new("a2", "B").with_genres(["indie", "folk"]),
        ];
        assert_eq!(unique_genres(&artists), ["rock", "indie", "folk"]);
    }

    #[test]
    fn test_profile_derives_genres() {
        let artists = vec![Artist::new("a1", "A").with_genres(["jazz"])];
        let profile = TasteProfile::new(
            UserIdentity::new("u1", "Uno"),
            artists,
            Vec::new(),
            TrackMetrics::empty(),
        );
        assert_eq!(profile.genres, ["jazz"]);
    }
}

//! Raw Spotify Web API response shapes and their mapping into domain types.
//!
//! These structs mirror the JSON the API returns; everything downstream of
//! this module works with `tastematch-core` types instead.

use serde::Deserialize;
use tastematch_core::{
    Artist, Image, Images, Track, TrackAlbum, TrackArtist, UserIdentity,
};

/// Generic paging wrapper used by most list endpoints.
#[derive(Debug, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct RawImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl From<RawImage> for Image {
    fn from(raw: RawImage) -> Self {
        Self {
            url: raw.url,
            width: raw.width,
            height: raw.height,
        }
    }
}

fn into_images(raw: Option<Vec<RawImage>>) -> Images {
    Images::new(raw.unwrap_or_default().into_iter().map(Into::into).collect())
}

/// Response of `GET /me`.
#[derive(Debug, Deserialize)]
pub struct RawUser {
    pub id: String,
    pub display_name: Option<String>,
    pub images: Option<Vec<RawImage>>,
}

impl From<RawUser> for UserIdentity {
    fn from(raw: RawUser) -> Self {
        let display_name = raw.display_name.unwrap_or_else(|| raw.id.clone());
        let avatar_url = raw
            .images
            .as_ref()
            .and_then(|images| images.first())
            .map(|i| i.url.clone());
        Self {
            id: raw.id,
            display_name,
            avatar_url,
        }
    }
}

/// Full artist object as returned by `GET /me/top/artists`.
#[derive(Debug, Deserialize)]
pub struct RawArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub images: Option<Vec<RawImage>>,
}

impl From<RawArtist> for Artist {
    fn from(raw: RawArtist) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            genres: raw.genres,
            images: into_images(raw.images),
        }
    }
}

/// Simplified artist reference carried inside track objects.
#[derive(Debug, Deserialize)]
pub struct RawTrackArtist {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RawAlbum {
    pub name: String,
    pub images: Option<Vec<RawImage>>,
    pub release_date: Option<String>,
}

/// Full track object as returned by the top-tracks endpoint and nested in
/// the history/library wrappers.
#[derive(Debug, Deserialize)]
pub struct RawTrack {
    pub id: String,
    pub name: String,
    #[serde(default = "Vec::new")]
    pub artists: Vec<RawTrackArtist>,
    pub album: RawAlbum,
    #[serde(default)]
    pub popularity: u8,
}

impl From<RawTrack> for Track {
    fn from(raw: RawTrack) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            artists: raw
                .artists
                .into_iter()
                .map(|a| TrackArtist::new(a.name))
                .collect(),
            album: TrackAlbum {
                name: raw.album.name,
                images: into_images(raw.album.images),
                release_date: raw.album.release_date,
            },
            popularity: raw.popularity,
        }
    }
}

/// Item of `GET /me/player/recently-played`.
#[derive(Debug, Deserialize)]
pub struct PlayHistoryItem {
    pub track: RawTrack,
}

/// Item of `GET /me/tracks`.
#[derive(Debug, Deserialize)]
pub struct SavedTrackItem {
    pub track: RawTrack,
}

/// Response of `POST /users/{id}/playlists`.
#[derive(Debug, Deserialize)]
pub struct RawPlaylist {
    pub id: String,
}

/// Response of `POST /playlists/{id}/tracks`.
#[derive(Debug, Deserialize)]
pub struct SnapshotResponse {
    #[allow(dead_code)]
    pub snapshot_id: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_without_display_name_falls_back_to_id() {
        let raw: RawUser =
            serde_json::from_str(r#"{"id": "u42", "display_name": null}"#).unwrap();
        let user = UserIdentity::from(raw);
        assert_eq!(user.display_name, "u42");
        assert!(user.avatar_url.is_none());
    }

    #[test]
    fn test_track_mapping() {
        let json = r#"{
            "id": "t1",
            "name": "Song",
            "artists": [{"name": "A"}, {"name": "B"}],
            "album": {
                "name": "Album",
                "images": [{"url": "http://img", "width": 640, "height": 640}],
                "release_date": "2021-03-01"
            },
            "popularity": 73
        }"#;
        let raw: RawTrack = serde_json::from_str(json).unwrap();
        let track = Track::from(raw);
        assert_eq!(track.artists_display(), "A, B");
        assert_eq!(track.popularity, 73);
        assert_eq!(track.album_image_url(), Some("http://img"));
    }

    #[test]
    fn test_missing_popularity_defaults_to_zero() {
        let json = r#"{"id": "t1", "name": "Song", "album": {"name": "Album"}}"#;
        let raw: RawTrack = serde_json::from_str(json).unwrap();
        let track = Track::from(raw);
        assert_eq!(track.popularity, 0);
        assert_eq!(track.artist_name(), "Unknown");
    }

    #[test]
    fn test_paging_tolerates_missing_items() {
        let paging: Paging<RawArtist> = serde_json::from_str("{}").unwrap();
        assert!(paging.items.is_empty());
    }
}

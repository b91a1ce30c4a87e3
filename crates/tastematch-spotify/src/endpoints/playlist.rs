//! Playlist creation.

use serde::Serialize;
use tastematch_core::Result;
use tracing::info;

use crate::wire::{RawPlaylist, SnapshotResponse};
use crate::SpotifyClient;

/// Description attached to every blended playlist.
pub const PLAYLIST_DESCRIPTION: &str =
    "Created by TasteMatch - A shared playlist based on your music taste!";

#[derive(Serialize)]
struct CreatePlaylistBody<'a> {
    name: &'a str,
    description: &'a str,
    public: bool,
}

#[derive(Serialize)]
struct AddTracksBody<'a> {
    uris: &'a [String],
}

impl SpotifyClient {
    /// Create a private playlist for `user_id` and fill it with the given
    /// track URIs. Returns the new playlist's id.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        track_uris: &[String],
    ) -> Result<String> {
        let body = CreatePlaylistBody {
            name,
            description: PLAYLIST_DESCRIPTION,
            public: false,
        };
        let playlist: RawPlaylist = self
            .post(&format!("/users/{user_id}/playlists"), &body)
            .await?;

        let _: SnapshotResponse = self
            .post(
                &format!("/playlists/{}/tracks", playlist.id),
                &AddTracksBody { uris: track_uris },
            )
            .await?;

        info!(
            "Created playlist {} with {} tracks",
            playlist.id,
            track_uris.len()
        );
        Ok(playlist.id)
    }
}

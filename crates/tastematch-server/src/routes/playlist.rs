//! Blended playlist creation.

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tastematch_core::Error;
use tastematch_engine::{blend_playlist_name, blend_playlists};
use tracing::info;

use crate::auth::client_from_cookies;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistBody {
    session_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistResponse {
    playlist_id: String,
    playlist_url: String,
    track_count: usize,
}

/// `POST /api/playlist`: blend both users' top tracks and create the
/// playlist in the caller's library.
pub async fn create(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CreatePlaylistBody>,
) -> Result<Json<CreatePlaylistResponse>, ApiError> {
    let client = client_from_cookies(&jar, &state.config.jwt_secret)?;

    let session = state.sessions.get_session(&body.session_id)?;
    let user1 = session.user1_profile;
    let user2 = session
        .user2_profile
        .ok_or_else(|| Error::SessionIncomplete(body.session_id.clone()))?;

    let track_ids = blend_playlists(
        &user1.top_tracks,
        &user1.genres,
        &user2.top_tracks,
        &user2.genres,
    );
    let uris: Vec<String> = track_ids
        .iter()
        .map(|id| format!("spotify:track:{id}"))
        .collect();
    let name = blend_playlist_name(&user1.user.display_name, &user2.user.display_name);

    let me = client.get_user_profile().await?;
    let playlist_id = client.create_playlist(&me.id, &name, &uris).await?;
    info!("Blended playlist {playlist_id} created for session {}", body.session_id);

    Ok(Json(CreatePlaylistResponse {
        playlist_url: format!("https://open.spotify.com/playlist/{playlist_id}"),
        playlist_id,
        track_count: track_ids.len(),
    }))
}

//! Session creation.

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tastematch_core::TimeRange;
use tracing::info;

use crate::auth::client_from_cookies;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSessionBody {
    time_range: Option<TimeRange>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    session_id: String,
}

/// `POST /api/sessions`: fetch the caller's taste profile and open a
/// session for a second user to join.
pub async fn create(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<CreateSessionBody>>,
) -> Result<Json<CreateSessionResponse>, ApiError> {
    let client = client_from_cookies(&jar, &state.config.jwt_secret)?;
    let time_range = body
        .and_then(|Json(b)| b.time_range)
        .unwrap_or_default();

    let profile = client.get_taste_profile(time_range).await?;
    info!(
        "Creating session for {} ({} artists, {} tracks)",
        profile.user.display_name,
        profile.top_artists.len(),
        profile.top_tracks.len()
    );

    let session_id = state.sessions.create_session(profile);
    Ok(Json(CreateSessionResponse { session_id }))
}

//! Comparison handlers: session status and the comparison itself.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tastematch_core::{ComparisonResult, Error, TimeRange, UserIdentity};
use tastematch_engine::{compare_tastes, ThreadRngSource};
use tracing::debug;

use crate::auth::client_from_cookies;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    user1: UserIdentity,
    has_user2: bool,
}

/// `GET /api/compare/{session_id}`: lightweight session lookup for the
/// share/join page.
pub async fn status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSummary>, ApiError> {
    let session = state.sessions.get_session(&session_id)?;
    Ok(Json(SessionSummary {
        has_user2: session.is_complete(),
        user1: session.user1_profile.user,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompareBody {
    time_range: Option<TimeRange>,
    check_status: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    has_user2: bool,
    user1_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user2_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResponse {
    comparison: ComparisonResult,
    user1: UserIdentity,
    user2: UserIdentity,
}

/// `POST /api/compare/{session_id}`: join (or refresh) the session with the
/// caller's profile for the requested listening window, then run the
/// comparison.
pub async fn compare(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(session_id): Path<String>,
    body: Option<Json<CompareBody>>,
) -> Result<Response, ApiError> {
    let client = client_from_cookies(&jar, &state.config.jwt_secret)?;
    let body = body.map(|Json(b)| b).unwrap_or_default();

    if body.check_status {
        let session = state.sessions.get_session(&session_id)?;
        let response = StatusResponse {
            has_user2: session.is_complete(),
            user1_name: session.user1_profile.user.display_name,
            user2_name: session
                .user2_profile
                .map(|p| p.user.display_name),
        };
        return Ok(Json(response).into_response());
    }

    let time_range = body.time_range.unwrap_or_default();
    let caller = client.get_taste_profile(time_range).await?;
    let caller_id = caller.user.id.clone();

    // Slot the caller's fresh profile into the seat they own: the creator's
    // side if they came back for another window, otherwise the second seat.
    // One store call, so a racing join cannot be lost.
    let session = state.sessions.submit_profile(&session_id, caller)?;
    let caller_is_user1 = caller_id == session.user1_profile.user.id;
    let user1 = session.user1_profile;
    let user2 = session
        .user2_profile
        .ok_or_else(|| Error::SessionIncomplete(session_id.clone()))?;

    // Widen the caller's track pool so track overlap is judged against more
    // than the ranked top list.
    let pool = client.get_tracks_for_time_range(time_range).await?;
    debug!("Fetched {} supplementary tracks for overlap", pool.len());
    let (supplementary1, supplementary2): (Option<&[_]>, Option<&[_]>) = if caller_is_user1 {
        (Some(pool.as_slice()), None)
    } else {
        (None, Some(pool.as_slice()))
    };

    let mut rng = ThreadRngSource;
    let comparison = compare_tastes(&user1, &user2, supplementary1, supplementary2, &mut rng)?;

    Ok(Json(CompareResponse {
        comparison,
        user1: user1.user,
        user2: user2.user,
    })
    .into_response())
}

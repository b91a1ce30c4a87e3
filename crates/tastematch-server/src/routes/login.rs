//! OAuth login and callback handlers.

use axum::extract::{Query, State};
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tastematch_core::Error;
use tastematch_spotify::{authorize_url, exchange_code};
use tracing::{info, warn};

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/auth/login`: redirect the browser to Spotify's consent page.
pub async fn login(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    let url = authorize_url(
        &state.config.spotify_client_id,
        &state.config.redirect_uri(),
    )?;
    Ok(Redirect::temporary(&url))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    error: Option<String>,
}

/// `GET /api/auth/callback`: exchange the authorization code, sign the
/// session JWT and send the browser on with the cookie set.
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<(CookieJar, Redirect), ApiError> {
    if let Some(denied) = query.error {
        warn!("Spotify authorization failed: {denied}");
        return Err(Error::Auth(format!("authorization failed: {denied}")).into());
    }
    let code = query
        .code
        .ok_or_else(|| Error::Auth("no authorization code provided".to_string()))?;

    let tokens = exchange_code(
        &state.config.spotify_client_id,
        &state.config.spotify_client_secret,
        &code,
        &state.config.redirect_uri(),
    )
    .await?;
    info!("Token exchange successful");

    let jwt = auth::issue_token(&state.config.jwt_secret, &tokens)?;
    let jar = jar.add(auth::session_cookie(jwt));

    Ok((jar, Redirect::temporary(state.config.post_login_path())))
}

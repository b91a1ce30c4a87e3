//! API route table.

mod compare;
mod login;
mod playlist;
mod sessions;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", get(login::login))
        .route("/api/auth/callback", get(login::callback))
        .route("/api/sessions", post(sessions::create))
        .route(
            "/api/compare/{session_id}",
            get(compare::status).post(compare::compare),
        )
        .route("/api/playlist", post(playlist::create))
        .with_state(state)
}

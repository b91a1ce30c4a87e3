//! # TasteMatch server
//!
//! HTTP API for comparing two users' music taste: OAuth login, comparison
//! sessions, the comparison itself, and blended-playlist creation.

mod auth;
mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use tastematch_session::SessionStore;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tastematch=debug,tastematch_server=debug".into()),
        )
        .init();

    info!("Starting TasteMatch v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let bind_addr = config.bind_addr;

    let state = AppState {
        config: Arc::new(config),
        sessions: Arc::new(SessionStore::new()),
    };

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("Listening on {bind_addr}");

    axum::serve(listener, app)
        .await
        .context("server terminated")?;

    Ok(())
}

//! # tastematch-spotify
//!
//! Spotify Web API client for TasteMatch.
//!
//! This crate covers the OAuth authorization-code flow, the listening-data
//! endpoints (profile, top artists/tracks, recently played, saved tracks)
//! and playlist creation. Responses are mapped into the domain types from
//! `tastematch-core`.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod wire;

pub use auth::{authorize_url, exchange_code, refresh_access_token, TokenResponse};
pub use client::SpotifyClient;

//! Web API endpoint implementations, grouped by concern.

mod library;
mod playlist;
mod profile;

pub use playlist::PLAYLIST_DESCRIPTION;

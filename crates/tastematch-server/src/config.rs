//! Server configuration from environment variables.

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Where the browser lands after a successful login.
const POST_LOGIN_PATH: &str = "/dashboard";

#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub jwt_secret: String,
    /// Externally visible base URL, used to build the OAuth redirect URI.
    pub public_base_url: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Read and validate configuration at startup.
    ///
    /// Required: `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`, `JWT_SECRET`.
    /// Optional: `BIND_ADDR` (default `127.0.0.1:3000`) and
    /// `PUBLIC_BASE_URL` (default derived from the bind address).
    pub fn from_env() -> Result<Self> {
        let spotify_client_id =
            env::var("SPOTIFY_CLIENT_ID").context("SPOTIFY_CLIENT_ID is not set")?;
        let spotify_client_secret =
            env::var("SPOTIFY_CLIENT_SECRET").context("SPOTIFY_CLIENT_SECRET is not set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;

        let bind_addr: SocketAddr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR is not a valid socket address")?;

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://{bind_addr}"))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            spotify_client_id,
            spotify_client_secret,
            jwt_secret,
            public_base_url,
            bind_addr,
        })
    }

    /// OAuth redirect URI registered with Spotify.
    pub fn redirect_uri(&self) -> String {
        format!("{}/api/auth/callback", self.public_base_url)
    }

    /// Where the callback sends the browser after setting the cookie.
    pub const fn post_login_path(&self) -> &'static str {
        POST_LOGIN_PATH
    }
}

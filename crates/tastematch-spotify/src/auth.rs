//! OAuth authorization-code flow against the Spotify accounts service.

use serde::Deserialize;
use tastematch_core::{Error, Result};
use url::Url;

const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Scopes requested at login. Reading listening data needs the first group;
/// playlist creation needs the modify scopes.
const SCOPES: &[&str] = &[
    "user-top-read",
    "playlist-read-private",
    "playlist-modify-private",
    "playlist-modify-public",
    "user-read-private",
    "user-read-email",
    "user-read-recently-played",
    "user-read-playback-state",
    "user-read-currently-playing",
];

/// Successful response of the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Build the URL the user is redirected to for consent.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] if the authorize URL cannot be built.
pub fn authorize_url(client_id: &str, redirect_uri: &str) -> Result<String> {
    let mut url = Url::parse(AUTHORIZE_URL)
        .map_err(|e| Error::InvalidArgument(format!("invalid authorize URL: {e}")))?;
    url.query_pairs_mut()
        .append_pair("client_id", client_id.trim())
        .append_pair("response_type", "code")
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("scope", &SCOPES.join(" "))
        .append_pair("show_dialog", "true");
    Ok(url.into())
}

/// Exchange an authorization code for tokens.
pub async fn exchange_code(
    client_id: &str,
    client_secret: &str,
    code: &str,
    redirect_uri: &str,
) -> Result<TokenResponse> {
    let params = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", redirect_uri),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ];
    request_token(&params).await
}

/// Obtain a fresh access token from a refresh token.
pub async fn refresh_access_token(
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<TokenResponse> {
    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ];
    request_token(&params).await
}

async fn request_token(params: &[(&str, &str)]) -> Result<TokenResponse> {
    let client = reqwest::Client::new();
    let response = client
        .post(TOKEN_URL)
        .form(params)
        .send()
        .await
        .map_err(|e| Error::Network(format!("token request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(Error::Auth(format!(
            "token endpoint returned {status}: {message}"
        )));
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| Error::ParseError(format!("invalid token response: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_contains_required_params() {
        let url = authorize_url("client123", "https://example.com/callback").unwrap();
        let parsed = Url::parse(&url).unwrap();
        let pairs: std::collections::HashMap<_, _> = parsed.query_pairs().collect();

        assert_eq!(parsed.host_str(), Some("accounts.spotify.com"));
        assert_eq!(pairs.get("client_id").map(AsRef::as_ref), Some("client123"));
        assert_eq!(pairs.get("response_type").map(AsRef::as_ref), Some("code"));
        assert!(pairs
            .get("scope")
            .is_some_and(|s| s.contains("user-top-read")));
    }

    #[test]
    fn test_authorize_url_trims_client_id() {
        let url = authorize_url("  spaced  ", "https://example.com/cb").unwrap();
        let parsed = Url::parse(&url).unwrap();
        let pairs: std::collections::HashMap<_, _> = parsed.query_pairs().collect();
        assert_eq!(pairs.get("client_id").map(AsRef::as_ref), Some("spaced"));
    }

    #[test]
    fn test_token_response_without_refresh_token() {
        let json = r#"{"access_token": "at", "expires_in": 3600}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "at");
        assert!(token.refresh_token.is_none());
        assert_eq!(token.expires_in, 3600);
    }
}

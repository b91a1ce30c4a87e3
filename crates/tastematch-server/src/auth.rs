//! Session tokens: a JWT carrying the user's Spotify tokens, delivered as
//! an http-only cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tastematch_core::{Error, Result};
use tastematch_spotify::{SpotifyClient, TokenResponse};

/// Cookie holding the signed session token.
pub const TOKEN_COOKIE: &str = "taste_token";

/// Claims carried inside the session JWT. The expiry mirrors the Spotify
/// access token's lifetime so the cookie dies with the token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub exp: u64,
}

/// Sign a session JWT from a fresh token response.
pub fn issue_token(jwt_secret: &str, tokens: &TokenResponse) -> Result<String> {
    let now = u64::try_from(Utc::now().timestamp())
        .map_err(|_| Error::Internal("system clock before epoch".to_string()))?;
    let claims = Claims {
        access_token: tokens.access_token.clone(),
        refresh_token: tokens.refresh_token.clone(),
        exp: now + tokens.expires_in,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("failed to sign session token: {e}")))
}

/// Verify a session JWT and return its claims. Expired or tampered tokens
/// are rejected.
pub fn verify_token(jwt_secret: &str, token: &str) -> Result<Claims> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| Error::Auth(format!("invalid session token: {e}")))
}

/// Build the http-only session cookie.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Authenticate a request from its cookies and return a Spotify client for
/// the caller's access token.
pub fn client_from_cookies(jar: &CookieJar, jwt_secret: &str) -> Result<SpotifyClient> {
    let token = jar
        .get(TOKEN_COOKIE)
        .ok_or_else(|| Error::Auth("no authentication token".to_string()))?;
    let claims = verify_token(jwt_secret, token.value())?;
    SpotifyClient::new(&claims.access_token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn tokens(expires_in: u64) -> TokenResponse {
        serde_json::from_value(serde_json::json!({
            "access_token": "spotify-at",
            "refresh_token": "spotify-rt",
            "expires_in": expires_in,
        }))
        .unwrap()
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let jwt = issue_token(SECRET, &tokens(3600)).unwrap();
        let claims = verify_token(SECRET, &jwt).unwrap();
        assert_eq!(claims.access_token, "spotify-at");
        assert_eq!(claims.refresh_token.as_deref(), Some("spotify-rt"));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let jwt = issue_token(SECRET, &tokens(3600)).unwrap();
        assert!(verify_token("other-secret", &jwt).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // jsonwebtoken applies a default 60s leeway, so go well past it.
        let mut t = tokens(0);
        t.access_token = "old".to_string();
        let now = u64::try_from(Utc::now().timestamp()).unwrap();
        let claims = Claims {
            access_token: t.access_token,
            refresh_token: None,
            exp: now - 120,
        };
        let jwt = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify_token(SECRET, &jwt).is_err());
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("tok".to_string());
        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}

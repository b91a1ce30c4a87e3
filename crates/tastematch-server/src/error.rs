//! HTTP error mapping for the core error taxonomy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tastematch_core::Error;
use tracing::error;

/// Wrapper turning [`tastematch_core::Error`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::Auth(_) => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            Error::SessionNotFound(_) | Error::SessionIncomplete(_) => {
                (StatusCode::NOT_FOUND, self.0.to_string())
            }
            Error::InvalidArgument(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            Error::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, self.0.to_string()),
            _ => {
                // Internal details stay in the log.
                error!("request failed: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::Auth("no token".into()), StatusCode::UNAUTHORIZED),
            (
                Error::SessionNotFound("abc".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                Error::SessionIncomplete("abc".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                Error::InvalidArgument("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                Error::RateLimited {
                    retry_after_secs: Some(5),
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                Error::Network("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}

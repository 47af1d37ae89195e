//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Authentication Errors**: Missing or unknown API keys
/// - **Rate Limiting**: Quota exhausted for the current window
/// - **Issuance Errors**: Token collision and retry exhaustion (internal)
/// - **Validation Errors**: Invalid request data
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No API key was presented in either the `X-API-Key` header or the
    /// `api_key` query parameter.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("API key required")]
    MissingApiKey,

    /// The presented API key does not exist in the key store.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The caller exhausted its quota for at least one rate-limit window.
    ///
    /// Returns HTTP 429 Too Many Requests. `retry_after` is the number of
    /// seconds until the soonest-resetting violated window expires.
    #[error("Rate limit exceeded")]
    RateLimited { retry_after: u64 },

    /// A token was registered that already exists in the key store.
    ///
    /// Internal to issuance: the issuer retries with a fresh timestamp
    /// instead of surfacing this. If it ever escapes to a response it is
    /// reported as a 500.
    #[error("API key already exists")]
    DuplicateKey,

    /// The issuer could not produce a unique token within its retry budget.
    ///
    /// Fatal to the current issuance request only. Returns HTTP 500.
    #[error("Could not issue API key")]
    IssuanceExhausted,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers and middleware to return
/// `Result<T, AppError>` and have errors automatically converted to proper
/// HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format, with `status` mirroring the HTTP
/// status code so it is machine-checkable from the body alone:
/// ```json
/// {
///   "error": "Human-readable error message",
///   "status": 401
/// }
/// ```
///
/// Rate-limit responses additionally carry a `retry_after` field (seconds)
/// and a standard `Retry-After` header so well-behaved clients can back off.
///
/// # Status Code Mapping
///
/// - `MissingApiKey` → 401 Unauthorized
/// - `InvalidApiKey` → 401 Unauthorized
/// - `RateLimited` → 429 Too Many Requests
/// - `InvalidRequest` → 400 Bad Request
/// - `DuplicateKey`, `IssuanceExhausted` → 500 Internal Server Error (details hidden from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, message). Rate-limit
        // rejections are built inline because they carry extra fields.
        let (status, message) = match &self {
            AppError::RateLimited { retry_after } => {
                let body = Json(json!({
                    "error": "Rate limit exceeded",
                    "status": 429,
                    "retry_after": retry_after
                }));
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, retry_after.to_string())],
                    body,
                )
                    .into_response();
            }
            AppError::MissingApiKey | AppError::InvalidApiKey => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::DuplicateKey | AppError::IssuanceExhausted => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn internal_errors_hide_details_behind_the_standard_message() {
        let (status, body) = body_json(AppError::IssuanceExhausted).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["status"], 500);

        let (status, body) = body_json(AppError::DuplicateKey).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn status_field_mirrors_the_http_status() {
        let (status, body) = body_json(AppError::MissingApiKey).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status"], 401);

        let (status, body) = body_json(AppError::RateLimited { retry_after: 7 }).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["status"], 429);
        assert_eq!(body["retry_after"], 7);
    }
}

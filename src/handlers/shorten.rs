//! URL shortener stub.
//!
//! Generates a random short code and echoes it back; nothing is stored, so
//! the short link is a demo artifact, as in the service this gateway fronts.

use crate::{error::AppError, middleware::auth::AuthContext};
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use rand::{Rng, distr::Alphanumeric};
use serde::{Deserialize, Serialize};

/// Length of generated short codes.
const SHORT_CODE_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// The URL to shorten; its absence is a 400, matching the upstream
    /// contract rather than a body-deserialization rejection.
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub success: bool,
    pub original_url: String,
    pub short_url: String,
    pub short_code: String,
    pub timestamp: DateTime<Utc>,
    pub note: String,
}

/// `POST /api/v1/shorten`
///
/// Requires a valid API key; rate limited at 30/hour per caller.
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
pub async fn shorten_url(
    Extension(_auth): Extension<AuthContext>,
    Json(request): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    let original_url = request.url.ok_or_else(|| {
        AppError::InvalidRequest("JSON body with \"url\" required".to_string())
    })?;

    let short_code: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SHORT_CODE_LEN)
        .map(char::from)
        .collect();

    Ok(Json(ShortenResponse {
        success: true,
        original_url,
        short_url: format!("https://short.example/{short_code}"),
        short_code,
        timestamp: Utc::now(),
        note: "This is a demo response. Implement database storage for production.".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::api_key::Tier;

    fn auth() -> Extension<AuthContext> {
        Extension(AuthContext {
            owner: "demo@example.com".to_string(),
            tier: Tier::Free,
        })
    }

    #[tokio::test]
    async fn shortens_with_a_six_char_alphanumeric_code() {
        let Json(response) = shorten_url(
            auth(),
            Json(ShortenRequest {
                url: Some("https://example.com/a/very/long/path".to_string()),
            }),
        )
        .await
        .unwrap();

        assert!(response.success);
        assert_eq!(response.original_url, "https://example.com/a/very/long/path");
        assert_eq!(response.short_code.len(), SHORT_CODE_LEN);
        assert!(response.short_code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(response.short_url.ends_with(&response.short_code));
    }

    #[tokio::test]
    async fn missing_url_field_is_a_400() {
        let err = shorten_url(auth(), Json(ShortenRequest { url: None }))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidRequest(_)));
    }
}

//! HTTP request handlers.

pub mod ai;
pub mod currency;
pub mod health;
pub mod keys;
pub mod quote;
pub mod shorten;
pub mod weather;

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Fallback handler for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found", "status": 404 })),
    )
}

//! Health check endpoint for service monitoring.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// Public and unauthenticated; the gate does not apply here. All gateway
/// state is in-memory, so liveness is the only thing to report.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "timestamp": "2026-08-30T19:00:00Z"
/// }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}

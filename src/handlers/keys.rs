//! API key issuance handler.
//!
//! Issuance is deliberately outside the auth gate: a caller without a key
//! must be able to obtain one. The route still sits behind the rate-limit
//! stage so key generation cannot be hammered.

use crate::{
    error::AppError,
    models::api_key::{GenerateKeyRequest, GenerateKeyResponse},
    services::key_issuer,
    state::AppState,
};
use axum::{Json, extract::State};

/// Issue a new API key.
///
/// # Endpoint
///
/// `POST /generate-key`
///
/// # Request Body
///
/// ```json
/// {
///   "email": "you@example.com"  // optional, defaults to demo@example.com
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: the new key, usable immediately
/// - **Error (500)**: issuance could not produce a unique token
///
/// ```json
/// {
///   "success": true,
///   "api_key": "3a7bd3e2360a3d29eea436fcfb7e44c735d117c42d1c1835420b6b9942dd4f1b",
///   "message": "API key generated successfully"
/// }
/// ```
///
/// Issuing twice for the same email yields two distinct keys, both valid.
pub async fn generate_key(
    State(state): State<AppState>,
    Json(request): Json<GenerateKeyRequest>,
) -> Result<Json<GenerateKeyResponse>, AppError> {
    let key = key_issuer::issue_key(state.keys.as_ref(), &state.secret_key, &request.email).await?;

    Ok(Json(GenerateKeyResponse {
        success: true,
        api_key: key.token,
        message: "API key generated successfully".to_string(),
    }))
}

//! API key authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the API key from the `X-API-Key` header or `api_key` query parameter
//! 2. Verify it exists in the key store
//! 3. Inject authentication context into the request
//! 4. Reject unauthorized requests with HTTP 401

use crate::{
    error::AppError, models::api_key::Tier, services::key_store::KeyStore, state::AppState,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Authentication context attached to authenticated requests.
///
/// This struct is inserted into the request's extension map and can be
/// extracted by route handlers to know who made the request and which tier
/// the key belongs to (the hook for tier-aware behavior downstream).
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Owner identity the key was issued to
    pub owner: String,

    /// Quota class of the presented key
    pub tier: Tier,
}

/// API key authentication middleware function.
///
/// # Flow
///
/// 1. Extract the token from the `X-API-Key` header, falling back to the
///    `api_key` query parameter (the header wins when both are present)
/// 2. No token at all: return 401 with "API key required"
/// 3. Look the token up in the key store by exact string equality
/// 4. Unknown token: return 401 with "Invalid API key"
/// 5. Known token: inject [`AuthContext`], call the next stage
///
/// # Arguments
///
/// * `State(state)` - Shared application state injected by Axum
/// * `request` - Incoming HTTP request (mutable to add extensions)
/// * `next` - Next middleware/handler in the chain
///
/// # Returns
///
/// - `Ok(Response)` if authenticated successfully (calls next stage)
/// - `Err(AppError::MissingApiKey | AppError::InvalidApiKey)` otherwise
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_api_key(&request).ok_or(AppError::MissingApiKey)?;

    let key = state
        .keys
        .lookup(&token)
        .await
        .ok_or(AppError::InvalidApiKey)?;

    // Route handlers can extract this using Extension<AuthContext>
    request.extensions_mut().insert(AuthContext {
        owner: key.owner,
        tier: key.tier,
    });

    Ok(next.run(request).await)
}

/// Pull the presented API key out of a request.
///
/// Checks the `X-API-Key` header first, then the `api_key` query parameter.
/// Returns `None` when neither carries a token. The value is passed through
/// verbatim; no trimming or normalization.
fn extract_api_key(request: &Request) -> Option<String> {
    if let Some(value) = request.headers().get("X-API-Key") {
        // A present header is the presented credential even when its bytes
        // are not readable ASCII; it must not fall through to the query
        // parameter. Unreadable bytes become an empty token, which no store
        // entry can match.
        return Some(value.to_str().map(str::to_string).unwrap_or_default());
    }

    let query = request.uri().query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == "api_key")
        .map(|(_, value)| value.into_owned())
}

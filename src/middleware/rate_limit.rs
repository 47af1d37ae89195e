//! Rate-limiting middleware.
//!
//! Runs after authentication. The rate-limited identity is the caller's
//! network address (as in the service this gateway reworks), so quota is
//! shared by everything behind one address regardless of which key is
//! presented. See DESIGN.md for the preserve-vs-fix discussion.

use std::net::SocketAddr;

use crate::{
    error::AppError,
    services::rate_limiter::{Admission, RateLimiter, retry_after_secs},
    state::AppState,
};
use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

/// Rate-limiting middleware function.
///
/// # Flow
///
/// 1. Derive the identity from the client socket address (IP only, no port)
/// 2. Collect the rules for the request path: global defaults plus any
///    route-specific overrides, all of which must pass
/// 3. Ask the limiter for admission
/// 4. Denied: return 429 with a retry-after hint; the business handler is
///    never invoked
///
/// # Returns
///
/// - `Ok(Response)` if admitted (calls next stage)
/// - `Err(AppError::RateLimited { .. })` if any window is exhausted
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = addr.ip().to_string();
    let rules = state.route_rules.rules_for(request.uri().path());

    match state.limiter.admit(&identity, &rules).await {
        Admission::Admitted => Ok(next.run(request).await),
        Admission::Denied { retry_after } => {
            let retry_after = retry_after_secs(retry_after);
            tracing::debug!(%identity, path = request.uri().path(), retry_after, "rate limited");
            Err(AppError::RateLimited { retry_after })
        }
    }
}

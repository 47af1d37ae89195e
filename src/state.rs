//! Shared application state.

use std::sync::Arc;

use crate::models::rate_limit::RouteRules;
use crate::services::key_store::KeyStore;
use crate::services::rate_limiter::RateLimiter;

/// State shared with all handlers and middleware via Axum's `State`
/// extractor.
///
/// The store and limiter are trait objects so the same gate logic runs
/// against the in-memory implementations here, test doubles, or a shared
/// external backend, without any change at the call sites.
#[derive(Clone)]
pub struct AppState {
    /// Registered API keys (pre-provisioned demo keys plus issued ones)
    pub keys: Arc<dyn KeyStore>,

    /// Admission control, one quota bucket per caller identity and rule
    pub limiter: Arc<dyn RateLimiter>,

    /// Declarative route-to-rules mapping consulted on every request
    pub route_rules: Arc<RouteRules>,

    /// Server secret mixed into issued tokens
    pub secret_key: String,
}

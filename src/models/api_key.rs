//! API key model for authentication.
//!
//! API keys identify callers of the gateway. The token itself is the lookup
//! key; once issued, a token is never reassigned to a different owner and is
//! never deleted (there is no revocation endpoint).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quota class of an API key.
///
/// Tier-based business differentiation is a downstream concern: the gate
/// resolves the tier and hands it to handlers via
/// [`AuthContext`](crate::middleware::auth::AuthContext), but does not vary
/// admission by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Premium,
}

/// A registered API key credential.
#[derive(Debug, Clone, Serialize)]
pub struct ApiKey {
    /// Opaque unique token presented by callers (64 lowercase hex characters
    /// for issued keys; pre-provisioned demo tokens may differ)
    pub token: String,

    /// Identity string supplied at issuance (e.g. an email address)
    pub owner: String,

    /// Quota class of this key
    pub tier: Tier,

    /// Timestamp when this key was issued
    pub issued_at: DateTime<Utc>,
}

/// Request body for `POST /generate-key`.
///
/// The owner identity defaults to the demo address when omitted, matching
/// the behavior of the service this gateway fronts.
#[derive(Debug, Deserialize)]
pub struct GenerateKeyRequest {
    #[serde(default = "default_owner")]
    pub email: String,
}

fn default_owner() -> String {
    "demo@example.com".to_string()
}

/// Response body for a successful key issuance.
#[derive(Debug, Serialize)]
pub struct GenerateKeyResponse {
    pub success: bool,

    /// The newly issued token, shown to the caller here and usable
    /// immediately
    pub api_key: String,

    pub message: String,
}

//! API key issuance.
//!
//! Issuance derives a token from the owner identity, the current time, and
//! the server secret, then registers it in the key store. The time component
//! makes each issuance unique: issuing twice for the same owner yields two
//! distinct, independently valid keys.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::models::api_key::{ApiKey, Tier};
use crate::services::key_store::KeyStore;

/// How many times issuance retries with a fresh timestamp when the derived
/// token collides with an existing one.
const MAX_ISSUE_ATTEMPTS: u32 = 3;

/// Derive a token from `(owner, issued_at, secret)`.
///
/// The token is the lowercase hex SHA-256 digest of
/// `"{owner}-{timestamp_micros}-{secret}"`. The digest is one-way, so a
/// third party cannot predict tokens without the server secret even when it
/// knows the owner identity and the issuance time.
pub fn derive_token(owner: &str, issued_at: DateTime<Utc>, secret: &str) -> String {
    let raw = format!("{}-{}-{}", owner, issued_at.timestamp_micros(), secret);

    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());

    hex::encode(hasher.finalize())
}

/// Issue a new API key for `owner` and register it in the store.
///
/// # Process
///
/// 1. Read the clock and derive a token from owner, timestamp, and secret
/// 2. Register the key in the store
/// 3. On a token collision, retry with a fresh timestamp (bounded)
///
/// New keys are always tier `free`; upgrades are out of scope.
///
/// # Errors
///
/// Returns [`AppError::IssuanceExhausted`] if every attempt collided. With
/// microsecond timestamps in the derivation input this requires the store to
/// misbehave, but the bound keeps a broken store from looping forever.
pub async fn issue_key(
    store: &dyn KeyStore,
    secret: &str,
    owner: &str,
) -> Result<ApiKey, AppError> {
    for attempt in 1..=MAX_ISSUE_ATTEMPTS {
        let issued_at = Utc::now();
        let token = derive_token(owner, issued_at, secret);

        let key = ApiKey {
            token,
            owner: owner.to_string(),
            tier: Tier::Free,
            issued_at,
        };

        match store.register(key).await {
            Ok(key) => {
                tracing::info!(owner = %key.owner, "API key issued");
                return Ok(key);
            }
            Err(AppError::DuplicateKey) => {
                // Same owner hit the same microsecond; the next attempt
                // reads a fresh timestamp.
                tracing::warn!(owner, attempt, "token collision during issuance, retrying");
            }
            Err(e) => return Err(e),
        }
    }

    Err(AppError::IssuanceExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::key_store::InMemoryKeyStore;
    use async_trait::async_trait;

    #[test]
    fn derived_token_is_deterministic_hex() {
        let at = Utc::now();
        let a = derive_token("a@example.com", at, "secret");
        let b = derive_token("a@example.com", at, "secret");

        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn derived_token_varies_with_each_input() {
        let at = Utc::now();
        let base = derive_token("a@example.com", at, "secret");

        assert_ne!(base, derive_token("b@example.com", at, "secret"));
        assert_ne!(base, derive_token("a@example.com", at, "other-secret"));
        assert_ne!(
            base,
            derive_token("a@example.com", at + chrono::Duration::microseconds(1), "secret")
        );
    }

    #[tokio::test]
    async fn issuing_twice_yields_two_valid_distinct_keys() {
        let store = InMemoryKeyStore::new();

        let first = issue_key(&store, "secret", "a@example.com").await.unwrap();
        let second = issue_key(&store, "secret", "a@example.com").await.unwrap();

        assert_ne!(first.token, second.token);
        assert!(store.lookup(&first.token).await.is_some());
        assert!(store.lookup(&second.token).await.is_some());
    }

    #[tokio::test]
    async fn issued_key_is_free_tier() {
        let store = InMemoryKeyStore::new();
        let key = issue_key(&store, "secret", "a@example.com").await.unwrap();
        assert_eq!(key.tier, Tier::Free);
    }

    /// Store that reports every token as already taken.
    struct AlwaysDuplicateStore;

    #[async_trait]
    impl KeyStore for AlwaysDuplicateStore {
        async fn register(&self, _key: ApiKey) -> Result<ApiKey, AppError> {
            Err(AppError::DuplicateKey)
        }

        async fn lookup(&self, _token: &str) -> Option<ApiKey> {
            None
        }
    }

    #[tokio::test]
    async fn issuance_gives_up_after_bounded_retries() {
        let store = AlwaysDuplicateStore;
        let err = issue_key(&store, "secret", "a@example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::IssuanceExhausted));
    }
}

//! API key storage.
//!
//! The key store maps a token to its [`ApiKey`] record. It is defined as a
//! trait so the gate logic works the same against the in-process table used
//! here (and in tests) and a shared external store in a deployment that needs
//! issued keys to survive restarts.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::api_key::{ApiKey, Tier};

/// Pre-provisioned demo token available from startup.
pub const DEMO_API_KEY: &str = "demo-key-12345";

/// Storage abstraction for API key records.
///
/// Implementations must guarantee token uniqueness for the lifetime of the
/// store: once registered, a token is never reassigned to a different owner.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Insert a new key record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateKey`] if the token is already registered.
    /// Token derivation makes this near-impossible in practice, but it must
    /// be checked so a collision can never silently rebind a token.
    async fn register(&self, key: ApiKey) -> Result<ApiKey, AppError>;

    /// Look up a key record by its exact token.
    ///
    /// Tokens are compared by exact string equality; no normalization.
    async fn lookup(&self, token: &str) -> Option<ApiKey>;
}

/// In-memory key store backed by a `HashMap` under an async `RwLock`.
///
/// Lookups take the read lock, registration takes the write lock, so
/// admission checks and issuance proceed concurrently without contention on
/// the common path.
#[derive(Debug, Default)]
pub struct InMemoryKeyStore {
    keys: RwLock<HashMap<String, ApiKey>>,
}

impl InMemoryKeyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the fixed demo credential.
    ///
    /// The demo key is registered for `demo@example.com` at tier `free`,
    /// matching the credential published in the API documentation.
    pub fn with_demo_keys() -> Self {
        let mut keys = HashMap::new();
        keys.insert(
            DEMO_API_KEY.to_string(),
            ApiKey {
                token: DEMO_API_KEY.to_string(),
                owner: "demo@example.com".to_string(),
                tier: Tier::Free,
                issued_at: Utc::now(),
            },
        );

        Self {
            keys: RwLock::new(keys),
        }
    }
}

#[async_trait]
impl KeyStore for InMemoryKeyStore {
    async fn register(&self, key: ApiKey) -> Result<ApiKey, AppError> {
        let mut keys = self.keys.write().await;

        if keys.contains_key(&key.token) {
            return Err(AppError::DuplicateKey);
        }

        keys.insert(key.token.clone(), key.clone());
        Ok(key)
    }

    async fn lookup(&self, token: &str) -> Option<ApiKey> {
        self.keys.read().await.get(token).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_key(token: &str, owner: &str) -> ApiKey {
        ApiKey {
            token: token.to_string(),
            owner: owner.to_string(),
            tier: Tier::Free,
            issued_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn register_then_lookup() {
        let store = InMemoryKeyStore::new();

        store
            .register(sample_key("abc123", "a@example.com"))
            .await
            .unwrap();

        let found = store.lookup("abc123").await.unwrap();
        assert_eq!(found.owner, "a@example.com");
        assert_eq!(found.tier, Tier::Free);
    }

    #[tokio::test]
    async fn lookup_unknown_token_returns_none() {
        let store = InMemoryKeyStore::with_demo_keys();
        assert!(store.lookup("not-a-key").await.is_none());
    }

    #[tokio::test]
    async fn lookup_is_exact_match() {
        let store = InMemoryKeyStore::with_demo_keys();

        // No trimming or case folding is applied to presented tokens.
        assert!(store.lookup("DEMO-KEY-12345").await.is_none());
        assert!(store.lookup(" demo-key-12345").await.is_none());
        assert!(store.lookup(DEMO_API_KEY).await.is_some());
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let store = InMemoryKeyStore::new();

        store
            .register(sample_key("abc123", "a@example.com"))
            .await
            .unwrap();
        let err = store
            .register(sample_key("abc123", "b@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateKey));

        // The original registration must be untouched.
        let found = store.lookup("abc123").await.unwrap();
        assert_eq!(found.owner, "a@example.com");
    }

    #[tokio::test]
    async fn demo_key_is_seeded() {
        let store = InMemoryKeyStore::with_demo_keys();

        let demo = store.lookup(DEMO_API_KEY).await.unwrap();
        assert_eq!(demo.owner, "demo@example.com");
        assert_eq!(demo.tier, Tier::Free);
    }
}

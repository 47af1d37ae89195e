//! Core gateway services: key storage, key issuance, and rate limiting.

pub mod key_issuer;
pub mod key_store;
pub mod rate_limiter;

//! Data models for the API gateway.

pub mod api_key;
pub mod rate_limit;

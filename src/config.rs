//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `SECRET_KEY` (optional): server secret mixed into issued API key tokens,
///   defaults to a development value that must be changed in production
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `RATE_LIMIT_PER_HOUR` (optional): default hourly quota per caller, defaults to 50
/// - `RATE_LIMIT_PER_DAY` (optional): default daily quota per caller, defaults to 200
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_secret_key")]
    pub secret_key: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_hourly_limit")]
    pub rate_limit_per_hour: u32,

    #[serde(default = "default_daily_limit")]
    pub rate_limit_per_day: u32,
}

/// Default secret if SECRET_KEY environment variable is not set.
fn default_secret_key() -> String {
    "gateway-secret-key-change-in-production".to_string()
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_hourly_limit() -> u32 {
    50
}

fn default_daily_limit() -> u32 {
    200
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values cannot be parsed into
    /// expected types (all fields have defaults, so none are required).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Parse environment variables into Config struct
        // Field names are automatically converted: secret_key -> SECRET_KEY
        envy::from_env::<Config>()
    }
}

//! Mock weather endpoint.
//!
//! A demo business handler behind the gate. Data is randomized, not real;
//! it exists so the gateway has something to protect.

use crate::middleware::auth::AuthContext;
use axum::{Extension, Json, extract::Query};
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

const CONDITIONS: &[&str] = &["Sunny", "Cloudy", "Rainy", "Partly Cloudy"];

#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    #[serde(default = "default_city")]
    pub city: String,
}

fn default_city() -> String {
    "Harare".to_string()
}

#[derive(Debug, Serialize)]
pub struct WeatherData {
    pub city: String,
    pub temperature: i32,
    pub condition: String,
    pub humidity: i32,
    pub wind_speed: i32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub success: bool,
    pub data: WeatherData,
    pub note: String,
}

/// `GET /api/v1/weather?city=..`
///
/// Requires a valid API key; rate limited at 50/hour per caller. The
/// authenticated tier is available here via [`AuthContext`] for future
/// tier-aware behavior.
pub async fn weather(
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<WeatherParams>,
) -> Json<WeatherResponse> {
    tracing::debug!(owner = %auth.owner, city = %params.city, "weather lookup");

    let mut rng = rand::rng();
    let condition = CONDITIONS
        .choose(&mut rng)
        .copied()
        .unwrap_or("Sunny")
        .to_string();

    Json(WeatherResponse {
        success: true,
        data: WeatherData {
            city: params.city,
            temperature: rng.random_range(15..=30),
            condition,
            humidity: rng.random_range(40..=80),
            wind_speed: rng.random_range(5..=25),
            timestamp: Utc::now(),
        },
        note: "For real-time weather, use OpenWeatherMap API".to_string(),
    })
}

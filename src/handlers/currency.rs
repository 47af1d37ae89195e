//! Mock currency conversion endpoint.
//!
//! Rates are a fixed demo table, not live market data. Conversion goes
//! through USD as the pivot currency.

use crate::{error::AppError, middleware::auth::AuthContext};
use axum::{Extension, Json, extract::Query};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Demo exchange rates, expressed as units per USD.
const RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("ZWL", 320.0),
    ("ZAR", 18.5),
    ("EUR", 0.85),
    ("GBP", 0.73),
];

fn rate_for(code: &str) -> Option<f64> {
    RATES
        .iter()
        .find(|(name, _)| *name == code)
        .map(|(_, rate)| *rate)
}

#[derive(Debug, Deserialize)]
pub struct CurrencyParams {
    #[serde(default = "default_from")]
    pub from: String,

    #[serde(default = "default_to")]
    pub to: String,

    #[serde(default = "default_amount")]
    pub amount: f64,
}

fn default_from() -> String {
    "USD".to_string()
}

fn default_to() -> String {
    "ZWL".to_string()
}

fn default_amount() -> f64 {
    1.0
}

#[derive(Debug, Serialize)]
pub struct CurrencyResponse {
    pub success: bool,
    pub from: String,
    pub to: String,
    pub amount: f64,
    /// Converted amount, rounded to 2 decimal places
    pub converted: f64,
    /// Effective rate from source to target, rounded to 4 decimal places
    pub rate: f64,
    pub timestamp: DateTime<Utc>,
}

/// `GET /api/v1/currency?from=..&to=..&amount=..`
///
/// Requires a valid API key; rate limited at 50/hour per caller. Currency
/// codes are case-insensitive; an unknown code on either side is a 400.
pub async fn convert(
    Extension(_auth): Extension<AuthContext>,
    Query(params): Query<CurrencyParams>,
) -> Result<Json<CurrencyResponse>, AppError> {
    let from = params.from.to_uppercase();
    let to = params.to.to_uppercase();

    let (from_rate, to_rate) = match (rate_for(&from), rate_for(&to)) {
        (Some(from_rate), Some(to_rate)) => (from_rate, to_rate),
        _ => return Err(AppError::InvalidRequest("Invalid currency code".to_string())),
    };

    // Convert to USD first, then to the target currency.
    let usd_amount = params.amount / from_rate;
    let converted = usd_amount * to_rate;

    Ok(Json(CurrencyResponse {
        success: true,
        from,
        to,
        amount: params.amount,
        converted: round_to(converted, 2),
        rate: round_to(to_rate / from_rate, 4),
        timestamp: Utc::now(),
    }))
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::api_key::Tier;

    fn auth() -> Extension<AuthContext> {
        Extension(AuthContext {
            owner: "demo@example.com".to_string(),
            tier: Tier::Free,
        })
    }

    fn params(from: &str, to: &str, amount: f64) -> Query<CurrencyParams> {
        Query(CurrencyParams {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        })
    }

    #[tokio::test]
    async fn converts_through_the_usd_pivot() {
        let Json(response) = convert(auth(), params("USD", "ZWL", 100.0)).await.unwrap();

        assert!(response.success);
        assert_eq!(response.from, "USD");
        assert_eq!(response.to, "ZWL");
        assert!((response.converted - 32000.0).abs() < 1e-9);
        assert!((response.rate - 320.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn cross_rates_are_rounded() {
        // EUR -> GBP: rate 0.73 / 0.85 = 0.8588..., converted 0.86 for 1 EUR.
        let Json(response) = convert(auth(), params("EUR", "GBP", 1.0)).await.unwrap();

        assert!((response.converted - 0.86).abs() < 1e-9);
        assert!((response.rate - 0.8588).abs() < 1e-9);
    }

    #[tokio::test]
    async fn currency_codes_are_case_insensitive() {
        let Json(response) = convert(auth(), params("usd", "zar", 2.0)).await.unwrap();

        assert_eq!(response.from, "USD");
        assert_eq!(response.to, "ZAR");
        assert!((response.converted - 37.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn unknown_currency_code_is_rejected() {
        let err = convert(auth(), params("USD", "XYZ", 1.0)).await.unwrap_err();

        match err {
            AppError::InvalidRequest(msg) => assert_eq!(msg, "Invalid currency code"),
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }
}

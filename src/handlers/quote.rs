//! Random quote endpoint.

use crate::middleware::auth::AuthContext;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use serde::Serialize;

const QUOTES: &[(&str, &str)] = &[
    (
        "The only way to do great work is to love what you do.",
        "Steve Jobs",
    ),
    (
        "Innovation distinguishes between a leader and a follower.",
        "Steve Jobs",
    ),
    (
        "Life is what happens when you're busy making other plans.",
        "John Lennon",
    ),
    (
        "The future belongs to those who believe in the beauty of their dreams.",
        "Eleanor Roosevelt",
    ),
    (
        "It is during our darkest moments that we must focus to see the light.",
        "Aristotle",
    ),
];

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub success: bool,
    pub quote: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

/// `GET /api/v1/quote`
///
/// Requires a valid API key; rate limited at 100/hour per caller.
pub async fn random_quote(Extension(_auth): Extension<AuthContext>) -> Json<QuoteResponse> {
    let (quote, author) = QUOTES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(QUOTES[0]);

    Json(QuoteResponse {
        success: true,
        quote: quote.to_string(),
        author: author.to_string(),
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::api_key::Tier;

    #[tokio::test]
    async fn returns_a_quote_from_the_fixed_list() {
        let auth = AuthContext {
            owner: "demo@example.com".to_string(),
            tier: Tier::Free,
        };

        let Json(response) = random_quote(Extension(auth)).await;

        assert!(response.success);
        assert!(
            QUOTES
                .iter()
                .any(|(q, a)| *q == response.quote && *a == response.author)
        );
    }
}

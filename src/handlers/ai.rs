//! Templated "AI" text endpoint.
//!
//! Not real inference: the prompt is bucketed by keyword and a canned reply
//! is picked at random, exactly like the service this gateway fronts.

use crate::{error::AppError, middleware::auth::AuthContext};
use axum::{Extension, Json, extract::Query};
use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

const GREETING_REPLIES: &[&str] = &[
    "Hello! How can I help you today?",
    "Hi there! What can I do for you?",
    "Greetings! How may I assist you?",
];
const FAREWELL_REPLIES: &[&str] = &["Goodbye! Have a great day!", "See you later!", "Take care!"];
const THANKS_REPLIES: &[&str] = &["You're welcome!", "Happy to help!", "Anytime!"];
const DEFAULT_REPLIES: &[&str] = &["I understand.", "Tell me more.", "Interesting!", "I see."];

#[derive(Debug, Deserialize)]
pub struct TextGenerateParams {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct TextGenerateResponse {
    pub success: bool,
    pub prompt: String,
    pub response: String,
    pub model: String,
    pub timestamp: DateTime<Utc>,
}

/// `GET /api/v1/ai/text-generate?prompt=..`
///
/// Requires a valid API key; rate limited at 30/minute per caller.
/// A missing or empty prompt is a 400.
pub async fn text_generate(
    Extension(_auth): Extension<AuthContext>,
    Query(params): Query<TextGenerateParams>,
) -> Result<Json<TextGenerateResponse>, AppError> {
    if params.prompt.is_empty() {
        return Err(AppError::InvalidRequest(
            "Prompt parameter required".to_string(),
        ));
    }

    let replies = classify(&params.prompt);
    let response = replies
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("I understand.")
        .to_string();

    Ok(Json(TextGenerateResponse {
        success: true,
        prompt: params.prompt,
        response,
        model: "Gateway-AI-v1".to_string(),
        timestamp: Utc::now(),
    }))
}

/// Pick the reply pool for a prompt by keyword matching.
fn classify(prompt: &str) -> &'static [&'static str] {
    let prompt = prompt.to_lowercase();

    let contains_any = |words: &[&str]| words.iter().any(|w| prompt.contains(w));

    if contains_any(&["hello", "hi", "hey", "greetings"]) {
        GREETING_REPLIES
    } else if contains_any(&["bye", "goodbye", "see you"]) {
        FAREWELL_REPLIES
    } else if contains_any(&["thank", "thanks"]) {
        THANKS_REPLIES
    } else {
        DEFAULT_REPLIES
    }
}

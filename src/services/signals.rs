// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signal extraction.
//!
//! Handles the extraction workflow:
//! 1. Validate the raw activity
//! 2. Run the classifiers
//! 3. Normalize name and description into semantic tokens
//! 4. Assemble and re-validate the signals (sanitized signals pass silently)

use crate::models::{Activity, ActivitySignals, Validation};
use crate::services::classify::{
    classify_elevation, classify_intensity, extract_tag_signals, extract_time_signals,
    extract_weather_signals,
};
use crate::services::guardrails::{
    validate_activity, validate_signals, ValidatedItem, ValidationError,
};

/// Tokens shorter than this are dropped.
const MIN_TOKEN_CHARS: usize = 3;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "into", "onto", "this", "that", "was", "were", "are",
    "but", "not", "all", "our", "out", "off", "then", "than", "just", "very", "some", "got",
    "had", "has", "have", "too", "its", "it's", "after", "before", "over",
];

/// Extract signals from an activity.
///
/// Fails only when the activity itself is invalid, or the assembled
/// signals are invalid with no sanitized variant.
pub fn extract_signals(activity: &Activity) -> Result<ActivitySignals, ValidationError> {
    if let Validation::Invalid(errors) = validate_activity(activity) {
        return Err(ValidationError {
            item: ValidatedItem::Activity,
            errors,
        });
    }

    let activity_type = [
        activity.sport_type.as_deref(),
        activity.activity_type.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|t| !t.trim().is_empty())
    .unwrap_or("Unknown")
    .to_string();

    let mut semantic_context = Vec::new();
    if let Some(name) = activity.name.as_deref() {
        semantic_context.extend(normalize_text(name));
    }
    if let Some(description) = activity.description.as_deref() {
        semantic_context.extend(normalize_text(description));
    }

    let signals = ActivitySignals {
        activity_type,
        intensity: classify_intensity(activity),
        elevation: classify_elevation(activity),
        time_of_day: extract_time_signals(activity),
        weather: extract_weather_signals(activity),
        tags: extract_tag_signals(activity),
        brands: activity.gear_name().map(|name| vec![name.to_string()]),
        semantic_context: (!semantic_context.is_empty()).then_some(semantic_context),
    };

    match validate_signals(&signals) {
        Validation::Valid(signals) => Ok(signals),
        Validation::Sanitized { value, errors } => {
            tracing::debug!(
                activity_id = activity.id,
                errors = ?errors,
                "Using sanitized signals"
            );
            Ok(value)
        }
        Validation::Invalid(errors) => Err(ValidationError {
            item: ValidatedItem::Signals,
            errors,
        }),
    }
}

/// Split free text into lowercase semantic tokens.
///
/// Anything that is not a letter, digit or apostrophe separates tokens.
/// Short tokens and stop words are dropped; order is preserved.
pub fn normalize_text(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|t| !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

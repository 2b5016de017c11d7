// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Guardrail validation for activities, signals and prompts.
//!
//! All checks run and errors accumulate in check order. Sanitization is
//! deliberately narrow: a sanitized prompt only has its length fixed and
//! may still carry forbidden content or an unknown style.

use crate::models::{
    Activity, ActivityImagePrompt, ActivitySignals, ImageStyle, Validation, MAX_PROMPT_LENGTH,
};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Maximum number of tags kept on a signals record.
pub const MAX_TAGS: usize = 10;
/// Maximum number of brands kept on a signals record.
pub const MAX_BRANDS: usize = 3;
/// Maximum number of semantic tokens kept on a signals record.
pub const MAX_SEMANTIC_TOKENS: usize = 20;

/// Denylist, matched case-insensitively on word boundaries.
const FORBIDDEN_TERMS: &[&str] = &[
    // real people
    "celebrity",
    "celebrities",
    "famous person",
    "real person",
    "portrait of",
    "likeness",
    "lookalike",
    "look-alike",
    "president",
    "prime minister",
    "politician",
    // political symbols
    "swastika",
    "hammer and sickle",
    "confederate flag",
    "nazi",
    "political",
    "politics",
    "propaganda",
    "election",
    // violence
    "blood",
    "bloody",
    "gore",
    "gory",
    "weapon",
    "weapons",
    "gun",
    "guns",
    "rifle",
    "knife",
    "knives",
    "kill",
    "killing",
    "murder",
    "violence",
    "violent",
    "war",
    "bomb",
    "corpse",
    // text rendered into the image
    "text saying",
    "text that says",
    "with the words",
    "caption",
    "captioned",
    "typography",
    "lettering",
    "watermark",
    "write",
    "written",
    "spell out",
];

static FORBIDDEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = FORBIDDEN_TERMS.iter().map(|t| regex::escape(t)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))
        .expect("forbidden-content pattern is a valid regex")
});

/// First forbidden term found in `text`, if any.
pub fn find_forbidden_content(text: &str) -> Option<&str> {
    FORBIDDEN_PATTERN.find(text).map(|m| m.as_str())
}

/// Whether `text` contains any forbidden term.
pub fn check_forbidden_content(text: &str) -> bool {
    FORBIDDEN_PATTERN.is_match(text)
}

/// What a failed validation was checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedItem {
    Activity,
    Signals,
    Prompt,
}

impl fmt::Display for ValidatedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValidatedItem::Activity => "Activity",
            ValidatedItem::Signals => "Signal",
            ValidatedItem::Prompt => "Prompt",
        })
    }
}

/// Validation failed and no sanitized value could be derived.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{item} validation failed: {}", .errors.join(", "))]
pub struct ValidationError {
    pub item: ValidatedItem,
    pub errors: Vec<String>,
}

/// Validate a raw activity.
///
/// Never sanitized: a structurally broken activity has no safe correction.
pub fn validate_activity(activity: &Activity) -> Validation<Activity> {
    let mut errors = Vec::new();

    if is_blank(activity.activity_type.as_deref()) {
        errors.push("Activity type is required and must be a string".to_string());
    }

    if is_blank(activity.sport_type.as_deref()) {
        errors.push("Activity sport_type is required and must be a string".to_string());
    }

    // NaN fails too
    if let Some(distance) = activity.distance {
        if !(distance > 0.0) {
            errors.push("Distance must be greater than 0".to_string());
        }
    }

    if let Some(gain) = activity.total_elevation_gain {
        if !(gain >= 0.0) {
            errors.push("Elevation gain must be non-negative".to_string());
        }
    }

    if errors.is_empty() {
        Validation::Valid(activity.clone())
    } else {
        Validation::Invalid(errors)
    }
}

/// Validate an assembled signals record.
///
/// When the activity type is present, the sanitized variant drops empty
/// and forbidden entries and truncates each list to its cap.
pub fn validate_signals(signals: &ActivitySignals) -> Validation<ActivitySignals> {
    let mut errors = Vec::new();

    let has_type = !signals.activity_type.trim().is_empty();
    if !has_type {
        errors.push("Activity type is required".to_string());
    }

    check_list("Tags", &signals.tags, MAX_TAGS, &mut errors);
    if let Some(brands) = &signals.brands {
        check_list("Brands", brands, MAX_BRANDS, &mut errors);
    }
    if let Some(tokens) = &signals.semantic_context {
        check_list("Semantic context", tokens, MAX_SEMANTIC_TOKENS, &mut errors);
    }

    if errors.is_empty() {
        return Validation::Valid(signals.clone());
    }

    if !has_type {
        return Validation::Invalid(errors);
    }

    let value = ActivitySignals {
        tags: clean_list(&signals.tags, MAX_TAGS),
        brands: signals
            .brands
            .as_deref()
            .map(|b| clean_list(b, MAX_BRANDS))
            .filter(|b| !b.is_empty()),
        semantic_context: signals
            .semantic_context
            .as_deref()
            .map(|t| clean_list(t, MAX_SEMANTIC_TOKENS))
            .filter(|t| !t.is_empty()),
        ..signals.clone()
    };

    Validation::Sanitized { value, errors }
}

/// Validate an image prompt.
///
/// Any failure yields a sanitized copy whose text is cut to
/// [`MAX_PROMPT_LENGTH`] characters. Nothing else is corrected.
pub fn validate_prompt(prompt: &ActivityImagePrompt) -> Validation<ActivityImagePrompt> {
    let mut errors = Vec::new();

    let length = prompt.text_len();
    if length > MAX_PROMPT_LENGTH {
        errors.push(format!(
            "Prompt length ({}) exceeds maximum ({})",
            length, MAX_PROMPT_LENGTH
        ));
    }

    if check_forbidden_content(&prompt.text) {
        errors.push("Prompt contains forbidden content".to_string());
    }

    if prompt.style.parse::<ImageStyle>().is_err() {
        let allowed: Vec<&str> = ImageStyle::ALL.iter().map(|s| s.as_str()).collect();
        errors.push(format!("Style must be one of: {}", allowed.join(", ")));
    }

    for (field, value) in [
        ("Mood", &prompt.mood),
        ("Subject", &prompt.subject),
        ("Scene", &prompt.scene),
        ("Text", &prompt.text),
    ] {
        if value.trim().is_empty() {
            errors.push(format!("{} is required and must be a string", field));
        }
    }

    if errors.is_empty() {
        return Validation::Valid(prompt.clone());
    }

    let value = ActivityImagePrompt {
        text: truncate_chars(&prompt.text, MAX_PROMPT_LENGTH),
        ..prompt.clone()
    };
    Validation::Sanitized { value, errors }
}

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn check_list(label: &str, items: &[String], max: usize, errors: &mut Vec<String>) {
    if items.len() > max {
        errors.push(format!(
            "{}: {} entries exceeds maximum ({})",
            label,
            items.len(),
            max
        ));
    }
    if items.iter().any(|i| i.trim().is_empty()) {
        errors.push(format!("{}: empty entries are not allowed", label));
    }
    if items.iter().any(|i| check_forbidden_content(i)) {
        errors.push(format!("{}: contains forbidden content", label));
    }
}

fn clean_list(items: &[String], max: usize) -> Vec<String> {
    items
        .iter()
        .filter(|i| !i.trim().is_empty() && !check_forbidden_content(i))
        .take(max)
        .cloned()
        .collect()
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Image prompt model and the fixed safe default prompt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Hard upper bound on prompt text, in characters.
pub const MAX_PROMPT_LENGTH: usize = 400;

/// Visual styles the composer may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    Cartoon,
    Minimal,
    Abstract,
    Illustrated,
}

impl ImageStyle {
    pub const ALL: [ImageStyle; 4] = [
        ImageStyle::Cartoon,
        ImageStyle::Minimal,
        ImageStyle::Abstract,
        ImageStyle::Illustrated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Cartoon => "cartoon",
            ImageStyle::Minimal => "minimal",
            ImageStyle::Abstract => "abstract",
            ImageStyle::Illustrated => "illustrated",
        }
    }
}

impl fmt::Display for ImageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or(())
    }
}

/// Prompt sent to an image provider.
///
/// `style` is kept as text so prompts received from outside the composer
/// can be checked by the guardrails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityImagePrompt {
    pub style: String,
    pub mood: String,
    pub subject: String,
    pub scene: String,
    pub text: String,
}

/// Text of the default prompt.
pub const DEFAULT_PROMPT_TEXT: &str =
    "minimal style, athlete, neutral mood, simple outdoor setting";

impl ActivityImagePrompt {
    /// The fixed, guardrail-compliant fallback prompt.
    pub fn fallback() -> Self {
        Self {
            style: ImageStyle::Minimal.to_string(),
            mood: "neutral".to_string(),
            subject: "athlete".to_string(),
            scene: "simple outdoor setting".to_string(),
            text: DEFAULT_PROMPT_TEXT.to_string(),
        }
    }

    /// Prompt text length in characters.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

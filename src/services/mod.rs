// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod classify;
pub mod guardrails;
pub mod image;
pub mod prompt;
pub mod providers;
pub mod signals;
pub mod strava;

pub use guardrails::{validate_activity, validate_prompt, validate_signals, ValidationError};
pub use image::{GenerateImageError, GenerateImageInput, GenerateImageOutput, ImageGenerator};
pub use prompt::generate_prompt;
pub use providers::{get_provider, ImageProvider, ProviderError, UnknownProviderError};
pub use signals::extract_signals;
pub use strava::{ActivitySourceError, ActivitySourceErrorCode, StravaClient};

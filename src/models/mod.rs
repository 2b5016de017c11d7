// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod prompt;
pub mod signals;
pub mod validation;

pub use activity::{Activity, ActivitySummary, Gear};
pub use prompt::{ActivityImagePrompt, ImageStyle, MAX_PROMPT_LENGTH};
pub use signals::{ActivitySignals, Elevation, Intensity, TimeOfDay, Weather};
pub use validation::{Validation, ValidationReport};

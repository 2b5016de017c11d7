// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity image generator
//!
//! This crate turns Strava activities into guardrail-checked image prompts
//! and generates an image for each, falling back to a fixed safe prompt
//! when generation cannot proceed.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::providers::{get_provider, ImageProvider, UnknownProviderError};
use services::{ImageGenerator, StravaClient};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub generator: ImageGenerator,
    pub strava: StravaClient,
}

impl AppState {
    /// Build state with the provider named in the configuration.
    pub fn from_config(config: Config) -> Result<Self, UnknownProviderError> {
        let provider = get_provider(Some(&config.image_provider), &config.provider_settings())?;
        Ok(Self::with_provider(config, provider))
    }

    /// Build state around an already-resolved provider.
    pub fn with_provider(config: Config, provider: Arc<dyn ImageProvider>) -> Self {
        let generator = ImageGenerator::new(provider, config.image_provider_timeout);
        let strava = StravaClient::new(config.strava_api_base_url.clone());
        Self {
            config,
            generator,
            strava,
        }
    }
}

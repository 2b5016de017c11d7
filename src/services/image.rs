// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Image generation with bounded retry and a default-prompt fallback.
//!
//! Flow for one request:
//! 1. Over-length prompt text skips straight to the fallback call
//! 2. Otherwise call the provider with the prompt
//! 3. On failure, retry up to [`MAX_RETRIES`] times with the default prompt
//! 4. When retries are exhausted, make one last fallback call whose
//!    failure is returned to the caller
//!
//! Every provider call is bounded by the generator's timeout. There is no
//! delay between attempts.

use crate::models::MAX_PROMPT_LENGTH;
use crate::services::providers::{ImageProvider, ProviderError};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Retries after the first failed call.
pub const MAX_RETRIES: u32 = 2;

/// Default bound on a single provider call.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

/// Input for one image generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerateImageInput<'a> {
    pub prompt: &'a str,
    pub default_prompt: &'a str,
    /// Attempts already made by the caller; echoed back on any success
    /// short of the final fallback.
    pub attempts: Option<u32>,
}

/// Generated image plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageOutput {
    /// `data:` URL or provider-hosted URL.
    pub image_data: String,
    /// True only for the over-length shortcut and the final fallback call.
    pub fallback: bool,
    pub attempts: u32,
}

/// The final fallback call failed.
#[derive(Debug, thiserror::Error)]
#[error("Image generation failed with {provider} after fallback: {source}")]
pub struct GenerateImageError {
    pub provider: String,
    #[source]
    pub source: ProviderError,
}

/// Orchestrates calls to a single image provider.
#[derive(Clone)]
pub struct ImageGenerator {
    provider: Arc<dyn ImageProvider>,
    timeout: Duration,
}

impl ImageGenerator {
    pub fn new(provider: Arc<dyn ImageProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn generate_image(
        &self,
        input: GenerateImageInput<'_>,
    ) -> Result<GenerateImageOutput, GenerateImageError> {
        let length = input.prompt.chars().count();
        if length > MAX_PROMPT_LENGTH {
            tracing::warn!(
                length,
                max = MAX_PROMPT_LENGTH,
                "Prompt too long, using default prompt"
            );
            return self.fallback(input.default_prompt).await;
        }

        match self.call(input.prompt).await {
            Ok(image_data) => {
                return Ok(GenerateImageOutput {
                    image_data,
                    fallback: false,
                    attempts: input.attempts.unwrap_or(0),
                });
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Image generation failed, retrying with default prompt"
                );
            }
        }

        for retry in 1..=MAX_RETRIES {
            match self.call(input.default_prompt).await {
                Ok(image_data) => {
                    tracing::info!(retry, "Image generated on retry");
                    // retries are internal; the caller sees a plain success
                    return Ok(GenerateImageOutput {
                        image_data,
                        fallback: false,
                        attempts: input.attempts.unwrap_or(0),
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        provider = self.provider.name(),
                        retry,
                        max_retries = MAX_RETRIES,
                        error = %e,
                        "Image generation retry failed"
                    );
                }
            }
        }

        tracing::warn!(
            provider = self.provider.name(),
            "Retries exhausted, making final fallback call"
        );
        self.fallback(input.default_prompt).await
    }

    /// Single un-retried call with the default prompt.
    async fn fallback(&self, default_prompt: &str) -> Result<GenerateImageOutput, GenerateImageError> {
        let image_data = self
            .call(default_prompt)
            .await
            .map_err(|source| GenerateImageError {
                provider: self.provider.name().to_string(),
                source,
            })?;

        Ok(GenerateImageOutput {
            image_data,
            fallback: true,
            attempts: MAX_RETRIES,
        })
    }

    async fn call(&self, prompt: &str) -> Result<String, ProviderError> {
        tokio::time::timeout(self.timeout, self.provider.generate(prompt))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout))?
    }
}

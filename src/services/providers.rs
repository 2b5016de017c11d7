// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Image generation providers and the provider registry.
//!
//! The registry is a closed set of names. Provider name and API keys are
//! always passed in by the caller; nothing here reads the environment.

use base64::{engine::general_purpose::STANDARD, Engine};
use futures_util::future::BoxFuture;
use std::sync::Arc;

/// Provider used when none is configured.
pub const DEFAULT_PROVIDER: &str = "pollinations";

const POLLINATIONS_BASE_URL: &str = "https://image.pollinations.ai";

/// A single image generation call failed.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Request(String),

    #[error("Provider returned HTTP {status}")]
    Status { status: u16 },

    #[error("Provider returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider call timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Requested provider name is not registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown image generation provider: {0}.")]
pub struct UnknownProviderError(pub String);

/// Something that turns prompt text into an image.
///
/// The returned string is either a `data:image/...;base64,` URL or a
/// plain URL to the generated image.
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &str;

    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, ProviderError>>;
}

/// API keys for the registered providers.
#[derive(Debug, Clone, Default)]
pub struct ProviderApiKeys {
    pub pollinations: Option<String>,
}

/// Everything the registry needs to build a provider.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_keys: ProviderApiKeys,
    pub width: u32,
    pub height: u32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_keys: ProviderApiKeys::default(),
            width: 1024,
            height: 1024,
        }
    }
}

/// Look up a provider by name; `None` selects [`DEFAULT_PROVIDER`].
pub fn get_provider(
    name: Option<&str>,
    settings: &ProviderSettings,
) -> Result<Arc<dyn ImageProvider>, UnknownProviderError> {
    match name.unwrap_or(DEFAULT_PROVIDER) {
        DEFAULT_PROVIDER => Ok(Arc::new(PollinationsProvider::new(
            settings.api_keys.pollinations.clone(),
            settings.width,
            settings.height,
        ))),
        other => Err(UnknownProviderError(other.to_string())),
    }
}

/// Pollinations.ai image provider.
///
/// The prompt is URL-encoded into the request path and the image bytes
/// are returned inline as a data URL.
#[derive(Clone)]
pub struct PollinationsProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    width: u32,
    height: u32,
}

impl PollinationsProvider {
    pub fn new(api_key: Option<String>, width: u32, height: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: POLLINATIONS_BASE_URL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            width,
            height,
        }
    }

    /// Point the provider at a different host (local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Request URL for a prompt, without query parameters.
    pub fn prompt_url(&self, prompt: &str) -> String {
        format!("{}/prompt/{}", self.base_url, urlencoding::encode(prompt))
    }

    async fn fetch_image(&self, prompt: &str) -> Result<String, ProviderError> {
        let mut request = self.http.get(self.prompt_url(prompt)).query(&[
            ("width", self.width.to_string()),
            ("height", self.height.to_string()),
            ("nologo", "true".to_string()),
        ]);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Pollinations request failed");
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .unwrap_or_default();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        encode_data_url(&content_type, &bytes)
    }
}

impl ImageProvider for PollinationsProvider {
    fn name(&self) -> &str {
        DEFAULT_PROVIDER
    }

    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, ProviderError>> {
        Box::pin(self.fetch_image(prompt))
    }
}

/// Build a `data:` URL from an image body.
pub fn encode_data_url(content_type: &str, bytes: &[u8]) -> Result<String, ProviderError> {
    if !content_type.starts_with("image/") {
        return Err(ProviderError::MalformedResponse(format!(
            "expected an image, got content type '{}'",
            content_type
        )));
    }
    if bytes.is_empty() {
        return Err(ProviderError::MalformedResponse("empty image body".to_string()));
    }

    Ok(format!("data:{};base64,{}", content_type, STANDARD.encode(bytes)))
}

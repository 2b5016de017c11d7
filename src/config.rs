//! Application configuration loaded from environment variables.
//!
//! This is the only place the process environment is read. Provider
//! selection and keys flow from here into the image generator.

use crate::services::image::DEFAULT_PROVIDER_TIMEOUT;
use crate::services::providers::{ProviderApiKeys, ProviderSettings, DEFAULT_PROVIDER};
use crate::services::strava::DEFAULT_STRAVA_API_BASE_URL;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Strava API base URL
    pub strava_api_base_url: String,

    /// Image provider name; unknown names fail at startup
    pub image_provider: String,
    /// Bound on each image provider call
    pub image_provider_timeout: Duration,
    pub image_width: u32,
    pub image_height: u32,

    // --- Secrets ---
    /// Optional Pollinations API key
    pub pollinations_api_key: Option<String>,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            strava_api_base_url: DEFAULT_STRAVA_API_BASE_URL.to_string(),
            image_provider: DEFAULT_PROVIDER.to_string(),
            image_provider_timeout: Duration::from_secs(5),
            image_width: 512,
            image_height: 512,
            pollinations_api_key: None,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            frontend_url: var("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:5173".to_string()),
            port: parse_var("PORT", var("PORT"), 8080)?,
            strava_api_base_url: var("STRAVA_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_STRAVA_API_BASE_URL.to_string()),

            image_provider: var("IMAGE_PROVIDER").unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
            image_provider_timeout: Duration::from_secs(parse_var(
                "IMAGE_PROVIDER_TIMEOUT_SECS",
                var("IMAGE_PROVIDER_TIMEOUT_SECS"),
                DEFAULT_PROVIDER_TIMEOUT.as_secs(),
            )?),
            image_width: parse_var("IMAGE_WIDTH", var("IMAGE_WIDTH"), 1024)?,
            image_height: parse_var("IMAGE_HEIGHT", var("IMAGE_HEIGHT"), 1024)?,

            pollinations_api_key: var("POLLINATIONS_API_KEY"),
        })
    }

    /// Settings handed to the provider registry.
    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            api_keys: ProviderApiKeys {
                pollinations: self.pollinations_api_key.clone(),
            },
            width: self.image_width,
            height: self.image_height,
        }
    }
}

fn parse_var<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { name, value: v }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup(&[])).expect("Config should load");

        assert_eq!(config.port, 8080);
        assert_eq!(config.image_provider, "pollinations");
        assert_eq!(config.image_provider_timeout, Duration::from_secs(60));
        assert_eq!(config.image_width, 1024);
        assert_eq!(config.strava_api_base_url, "https://www.strava.com/api/v3");
        assert!(config.pollinations_api_key.is_none());
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "3000"),
            ("IMAGE_PROVIDER", "bogus"),
            ("IMAGE_PROVIDER_TIMEOUT_SECS", "15"),
            ("POLLINATIONS_API_KEY", " secret "),
            ("IMAGE_HEIGHT", "768"),
        ]))
        .expect("Config should load");

        assert_eq!(config.port, 3000);
        // validated when the provider is resolved, not here
        assert_eq!(config.image_provider, "bogus");
        assert_eq!(config.image_provider_timeout, Duration::from_secs(15));
        assert_eq!(config.pollinations_api_key.as_deref(), Some("secret"));
        assert_eq!(config.provider_settings().height, 768);
    }

    #[test]
    fn test_config_invalid_number() {
        let err = Config::from_lookup(lookup(&[("IMAGE_WIDTH", "wide")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for environment variable IMAGE_WIDTH: wide"
        );
    }
}

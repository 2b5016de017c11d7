// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for fetching activities.
//!
//! Every failure is reported as an [`ActivitySourceError`] carrying a
//! stable code and whether the caller may retry.

use crate::models::{Activity, ActivitySummary};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Default Strava API base URL.
pub const DEFAULT_STRAVA_API_BASE_URL: &str = "https://www.strava.com/api/v3";

/// Why fetching from the activity source failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivitySourceErrorCode {
    NetworkError,
    Unauthorized,
    Forbidden,
    NotFound,
    RateLimited,
    ServerError,
    MalformedResponse,
}

impl ActivitySourceErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivitySourceErrorCode::NetworkError => "NETWORK_ERROR",
            ActivitySourceErrorCode::Unauthorized => "UNAUTHORIZED",
            ActivitySourceErrorCode::Forbidden => "FORBIDDEN",
            ActivitySourceErrorCode::NotFound => "NOT_FOUND",
            ActivitySourceErrorCode::RateLimited => "RATE_LIMITED",
            ActivitySourceErrorCode::ServerError => "SERVER_ERROR",
            ActivitySourceErrorCode::MalformedResponse => "MALFORMED_RESPONSE",
        }
    }
}

impl fmt::Display for ActivitySourceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by the activity source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Strava API error ({code}): {message}")]
pub struct ActivitySourceError {
    pub code: ActivitySourceErrorCode,
    pub message: String,
    pub retryable: bool,
}

impl ActivitySourceError {
    pub fn new(code: ActivitySourceErrorCode, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            code,
            message: message.into(),
            retryable,
        }
    }

    /// Map a non-success HTTP status to an error.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        use ActivitySourceErrorCode::*;

        let (code, retryable) = match status.as_u16() {
            401 => (Unauthorized, false),
            403 => (Forbidden, false),
            404 => (NotFound, false),
            429 => (RateLimited, true),
            500..=599 => (ServerError, true),
            _ => (ServerError, false),
        };

        let message = if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {}: {}", status, body)
        };

        Self::new(code, message, retryable)
    }
}

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
}

impl StravaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get a detailed activity by ID.
    pub async fn get_activity(
        &self,
        access_token: &str,
        activity_id: u64,
    ) -> Result<Activity, ActivitySourceError> {
        let url = format!("{}/activities/{}", self.base_url, activity_id);
        tracing::debug!(activity_id, "Fetching Strava activity");
        self.get_json(&url, access_token, &[]).await
    }

    /// List the token holder's activities, newest first.
    pub async fn list_activities(
        &self,
        access_token: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ActivitySummary>, ActivitySourceError> {
        let url = format!("{}/athlete/activities", self.base_url);
        self.get_json(
            &url,
            access_token,
            &[("page", page.to_string()), ("per_page", per_page.to_string())],
        )
        .await
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
        query: &[(&str, String)],
    ) -> Result<T, ActivitySourceError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                ActivitySourceError::new(ActivitySourceErrorCode::NetworkError, e.to_string(), true)
            })?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ActivitySourceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ActivitySourceError::from_status(status, &body);

            if err.code == ActivitySourceErrorCode::RateLimited {
                tracing::warn!("Strava rate limit hit (429)");
            } else {
                tracing::warn!(status = %status, code = %err.code, "Strava request failed");
            }
            return Err(err);
        }

        let bytes = response.bytes().await.map_err(|e| {
            ActivitySourceError::new(ActivitySourceErrorCode::NetworkError, e.to_string(), true)
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            ActivitySourceError::new(
                ActivitySourceErrorCode::MalformedResponse,
                format!("JSON parse error: {}", e),
                false,
            )
        })
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::services::guardrails::ValidationError;
use crate::services::image::GenerateImageError;
use crate::services::providers::UnknownProviderError;
use crate::services::strava::{ActivitySourceError, ActivitySourceErrorCode};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    ActivitySource(#[from] ActivitySourceError),

    #[error(transparent)]
    UnknownProvider(#[from] UnknownProviderError),

    #[error(transparent)]
    ImageGeneration(#[from] GenerateImageError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the caller may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::ActivitySource(e) => e.retryable,
            AppError::ImageGeneration(_) => true,
            _ => false,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Validation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                Some(err.to_string()),
            ),
            AppError::ActivitySource(err) => {
                let status = match err.code {
                    ActivitySourceErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
                    ActivitySourceErrorCode::Forbidden => StatusCode::FORBIDDEN,
                    ActivitySourceErrorCode::NotFound => StatusCode::NOT_FOUND,
                    ActivitySourceErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, "strava_error", Some(err.message.clone()))
            }
            AppError::UnknownProvider(err) => {
                tracing::error!(error = %err, "Image provider misconfigured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "provider_config_error",
                    Some(err.to_string()),
                )
            }
            AppError::ImageGeneration(err) => {
                tracing::error!(error = %err, "Image generation failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "image_generation_error",
                    Some(err.to_string()),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

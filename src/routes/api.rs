// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity and image generation API routes.

use crate::error::{AppError, Result};
use crate::middleware::StravaToken;
use crate::models::{Activity, ActivityImagePrompt, ActivitySignals, ActivitySummary};
use crate::services::{extract_signals, generate_prompt, GenerateImageInput, GenerateImageOutput};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Routes that talk to Strava on the caller's behalf.
/// The token middleware is applied in routes/mod.rs for these routes.
pub fn strava_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(get_activities))
        .route("/api/activity-image/{activity_id}", get(get_activity_image))
}

/// Routes that work on a caller-supplied activity.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/activity-image", post(post_activity_image))
}

// ─── Activities ──────────────────────────────────────────────

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    page: u32,
    /// Pagination: items per page
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    30
}

const MAX_PER_PAGE: u32 = 100;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    pub activities: Vec<ActivitySummary>,
    pub page: u32,
    pub per_page: u32,
}

/// List the token holder's recent activities.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<StravaToken>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<ActivitiesResponse>> {
    if params.page < 1 {
        return Err(AppError::BadRequest(
            "Page must be greater than 0".to_string(),
        ));
    }

    let per_page = params.per_page.clamp(1, MAX_PER_PAGE);
    tracing::debug!(page = params.page, per_page, "Fetching activities");

    let activities = state
        .strava
        .list_activities(&token.0, params.page, per_page)
        .await?;

    Ok(Json(ActivitiesResponse {
        activities,
        page: params.page,
        per_page,
    }))
}

// ─── Image Generation ────────────────────────────────────────

/// Everything produced for one activity.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityImageResponse {
    pub activity: Activity,
    /// Absent when the activity failed validation
    pub signals: Option<ActivitySignals>,
    pub prompt: ActivityImagePrompt,
    /// Absent when even the fallback generation failed
    pub image: Option<GenerateImageOutput>,
    pub provider: String,
    pub generated_at: String,
}

/// Fetch an activity from Strava and generate its image.
async fn get_activity_image(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<StravaToken>,
    Path(activity_id): Path<String>,
) -> Result<Json<ActivityImageResponse>> {
    let activity_id: u64 = activity_id
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid activity id: {}", activity_id)))?;

    let activity = state.strava.get_activity(&token.0, activity_id).await?;

    Ok(Json(generate_activity_image(&state, activity).await))
}

/// Generate an image for an activity supplied in the request body.
async fn post_activity_image(
    State(state): State<Arc<AppState>>,
    Json(activity): Json<Activity>,
) -> Result<Json<ActivityImageResponse>> {
    Ok(Json(generate_activity_image(&state, activity).await))
}

/// Run the extract → prompt → generate pipeline.
///
/// Never fails: invalid activities get the default prompt and a failed
/// generation is reported as a missing image.
pub async fn generate_activity_image(state: &AppState, activity: Activity) -> ActivityImageResponse {
    let (signals, prompt) = match extract_signals(&activity) {
        Ok(signals) => {
            let prompt = generate_prompt(&signals);
            (Some(signals), prompt)
        }
        Err(e) => {
            tracing::warn!(
                activity_id = activity.id,
                error = %e,
                "Signal extraction failed, using default prompt"
            );
            (None, ActivityImagePrompt::fallback())
        }
    };

    let default_prompt = ActivityImagePrompt::fallback();
    let image = match state
        .generator
        .generate_image(GenerateImageInput {
            prompt: &prompt.text,
            default_prompt: &default_prompt.text,
            attempts: None,
        })
        .await
    {
        Ok(output) => {
            tracing::info!(
                activity_id = activity.id,
                style = %prompt.style,
                fallback = output.fallback,
                attempts = output.attempts,
                "Activity image generated"
            );
            Some(output)
        }
        Err(e) => {
            tracing::error!(activity_id = activity.id, error = %e, "Activity image generation failed");
            None
        }
    };

    ActivityImageResponse {
        activity,
        signals,
        prompt,
        image,
        provider: state.generator.provider_name().to_string(),
        generated_at: format_utc_rfc3339(chrono::Utc::now()),
    }
}

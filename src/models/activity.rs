// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity model as received from the activity source.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Strava `workout_type` for a race run.
pub const WORKOUT_TYPE_RUN_RACE: u32 = 1;
/// Strava `workout_type` for a race ride.
pub const WORKOUT_TYPE_RIDE_RACE: u32 = 11;

/// Raw activity record (subset of Strava's DetailedActivity).
///
/// `type` and `sport_type` are optional on the wire so that a missing
/// field is reported by validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    /// Strava activity ID
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    /// Legacy activity type (Ride, Run, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    /// Sport type (MountainBikeRide, TrailRun, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_type: Option<String>,
    /// Activity name/title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Distance in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Moving time in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving_time: Option<f64>,
    /// Elevation gain in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_watts: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_average_watts: Option<f64>,
    /// Start time (ISO 8601, UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Start time in the athlete's timezone (ISO 8601, wall clock)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_local: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commute: Option<bool>,
    /// Indoor trainer activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gear: Option<Gear>,
}

/// Gear attached to an activity (bike, shoes).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Gear {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Activity {
    /// Whether Strava marked this activity as a race.
    pub fn is_race(&self) -> bool {
        matches!(
            self.workout_type,
            Some(WORKOUT_TYPE_RUN_RACE) | Some(WORKOUT_TYPE_RIDE_RACE)
        )
    }

    /// Name of the attached gear, if any and non-empty.
    pub fn gear_name(&self) -> Option<&str> {
        self.gear
            .as_ref()
            .and_then(|g| g.name.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// Summary activity for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitySummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub name: String,
    pub sport_type: String,
    pub start_date: String,
    pub distance: f64,
}

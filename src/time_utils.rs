// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and parsing.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Timelike, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Hour of day exactly as written in an ISO 8601 timestamp.
///
/// Strava's `start_date_local` is wall-clock time with a `Z` suffix, so the
/// hour is taken from the written offset and never converted.
pub fn wall_clock_hour(timestamp: &str) -> Option<u32> {
    let timestamp = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.hour());
    }

    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|dt| dt.hour())
        .ok()
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signal classifiers.
//!
//! Pure, total functions from raw activity fields to categorical signals.
//! No I/O and no randomness: the same activity always yields the same
//! signals.

use crate::models::{Activity, Elevation, Intensity, TimeOfDay, Weather};
use crate::time_utils::wall_clock_hour;

/// Pace at or above this (seconds per km) is low intensity (6:00 min/km).
pub const LOW_PACE_THRESHOLD: f64 = 360.0;
/// Pace at or below this (seconds per km) is high intensity (4:00 min/km).
pub const HIGH_PACE_THRESHOLD: f64 = 240.0;
/// Average power above this (watts) is high intensity.
pub const HIGH_POWER_THRESHOLD: f64 = 250.0;
/// Average power below this (watts) is low intensity.
pub const LOW_POWER_THRESHOLD: f64 = 150.0;

/// Elevation gain below this (meters) is flat.
pub const FLAT_THRESHOLD: f64 = 50.0;
/// Elevation gain at or above this (meters) is mountainous.
pub const ROLLING_THRESHOLD: f64 = 500.0;

const MORNING_START: u32 = 5;
const MORNING_END: u32 = 10;
const EVENING_START: u32 = 17;
const NIGHT_START: u32 = 20;

const FOG_WORDS: &[&str] = &["fog", "foggy", "mist", "misty", "haze", "hazy"];
const RAIN_WORDS: &[&str] = &["rain", "rainy", "raining", "drizzle", "wet", "storm", "stormy"];
const SUN_WORDS: &[&str] = &["sun", "sunny", "sunshine", "clear", "bluebird"];

/// Keyword phrases scanned in name/description, in tag order.
const TAG_KEYWORDS: &[(&str, &[&str])] = &[
    ("recovery", &["recovery", "recover"]),
    ("easy", &["easy", "shakeout", "shake out"]),
    ("race", &["race", "marathon", "10k race", "parkrun"]),
    ("commute", &["commute", "to work", "from work"]),
    ("with kid", &["with kid", "with kids", "with my son", "with my daughter"]),
    ("long run", &["long run"]),
    ("intervals", &["interval", "intervals", "repeats"]),
];

/// Classify intensity from pace, then power.
///
/// A pace verdict always wins. `average_watts` is consulted before
/// `weighted_average_watts`.
pub fn classify_intensity(activity: &Activity) -> Intensity {
    if let (Some(distance), Some(moving_time)) = (activity.distance, activity.moving_time) {
        if distance > 0.0 {
            let pace_seconds_per_km = moving_time / (distance / 1000.0);

            if pace_seconds_per_km >= LOW_PACE_THRESHOLD {
                return Intensity::Low;
            }
            if pace_seconds_per_km <= HIGH_PACE_THRESHOLD {
                return Intensity::High;
            }
        }
    }

    for watts in [activity.average_watts, activity.weighted_average_watts]
        .into_iter()
        .flatten()
    {
        if watts > HIGH_POWER_THRESHOLD {
            return Intensity::High;
        }
        if watts < LOW_POWER_THRESHOLD {
            return Intensity::Low;
        }
    }

    Intensity::Medium
}

/// Classify terrain from total elevation gain.
pub fn classify_elevation(activity: &Activity) -> Elevation {
    match activity.total_elevation_gain {
        None => Elevation::Flat,
        Some(gain) if gain < FLAT_THRESHOLD => Elevation::Flat,
        Some(gain) if gain >= ROLLING_THRESHOLD => Elevation::Mountainous,
        Some(_) => Elevation::Rolling,
    }
}

/// Bucket the start time into a time of day.
///
/// Local start time is preferred over UTC. Missing or unparseable
/// timestamps are treated as daytime.
pub fn extract_time_signals(activity: &Activity) -> TimeOfDay {
    let hour = activity
        .start_date_local
        .as_deref()
        .or(activity.start_date.as_deref())
        .and_then(wall_clock_hour);

    match hour {
        None => TimeOfDay::Day,
        Some(h) if (MORNING_START..MORNING_END).contains(&h) => TimeOfDay::Morning,
        Some(h) if (MORNING_END..EVENING_START).contains(&h) => TimeOfDay::Day,
        Some(h) if (EVENING_START..NIGHT_START).contains(&h) => TimeOfDay::Evening,
        Some(_) => TimeOfDay::Night,
    }
}

/// Best-effort weather from the activity's own text.
///
/// Strava does not expose weather, so this only looks at words the athlete
/// wrote. Fog beats rain beats sun when several appear.
pub fn extract_weather_signals(activity: &Activity) -> Option<Weather> {
    let words = activity_words(activity);

    if mentions_any(&words, FOG_WORDS) {
        Some(Weather::Foggy)
    } else if mentions_any(&words, RAIN_WORDS) {
        Some(Weather::Rainy)
    } else if mentions_any(&words, SUN_WORDS) {
        Some(Weather::Sunny)
    } else {
        None
    }
}

/// Ordered, de-duplicated tags from structured flags and keywords.
pub fn extract_tag_signals(activity: &Activity) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut push = |tag: &str| {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    };

    if activity.commute == Some(true) {
        push("commute");
    }
    if activity.is_race() {
        push("race");
    }
    if activity.trainer == Some(true) {
        push("indoor");
    }

    let text = format!(" {} ", activity_words(activity).join(" "));
    for (tag, phrases) in TAG_KEYWORDS {
        if phrases.iter().any(|p| text.contains(&format!(" {} ", p))) {
            push(*tag);
        }
    }

    tags
}

fn mentions_any(words: &[String], keys: &[&str]) -> bool {
    words.iter().any(|w| keys.contains(&w.as_str()))
}

/// Lowercased words of name and description, punctuation removed.
fn activity_words(activity: &Activity) -> Vec<String> {
    [activity.name.as_deref(), activity.description.as_deref()]
        .into_iter()
        .flatten()
        .flat_map(|text| {
            text.to_lowercase()
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

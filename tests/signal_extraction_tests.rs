// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signal extraction tests against realistic Strava activities.

use activity_imagegen::models::{Activity, Elevation, Intensity, TimeOfDay, Weather};
use activity_imagegen::services::classify::{classify_elevation, classify_intensity};
use activity_imagegen::services::guardrails::ValidatedItem;
use activity_imagegen::services::extract_signals;

mod common;

#[test]
fn test_structurally_invalid_activities_report_exact_errors() {
    let cases: Vec<(Activity, Vec<&str>)> = vec![
        (
            Activity {
                distance: Some(0.0),
                ..common::sample_run()
            },
            vec!["Distance must be greater than 0"],
        ),
        (
            Activity {
                distance: Some(-5.0),
                ..common::sample_run()
            },
            vec!["Distance must be greater than 0"],
        ),
        (
            Activity {
                activity_type: None,
                ..common::sample_run()
            },
            vec!["Activity type is required and must be a string"],
        ),
        (
            Activity {
                sport_type: Some("".to_string()),
                ..common::sample_run()
            },
            vec!["Activity sport_type is required and must be a string"],
        ),
        (
            Activity {
                activity_type: None,
                sport_type: None,
                distance: Some(0.0),
                total_elevation_gain: Some(-3.0),
                ..common::sample_run()
            },
            vec![
                "Activity type is required and must be a string",
                "Activity sport_type is required and must be a string",
                "Distance must be greater than 0",
                "Elevation gain must be non-negative",
            ],
        ),
    ];

    for (activity, expected) in cases {
        let err = extract_signals(&activity).expect_err("activity should be rejected");
        assert_eq!(err.item, ValidatedItem::Activity);
        assert_eq!(err.errors, expected);
    }
}

#[test]
fn test_validation_error_message() {
    let activity = Activity {
        distance: Some(0.0),
        ..common::sample_run()
    };
    let err = extract_signals(&activity).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Activity validation failed: Distance must be greater than 0"
    );
}

#[test]
fn test_mountain_bike_ride_scenario() {
    let activity = common::sample_mountain_bike_ride();

    // 4207 s over 28.099 km is about 149.7 s/km, at or below the
    // high-intensity pace threshold of 240 s/km
    assert_eq!(classify_elevation(&activity), Elevation::Mountainous);
    assert_eq!(classify_intensity(&activity), Intensity::High);

    let signals = extract_signals(&activity).unwrap();
    assert_eq!(signals.activity_type, "MountainBikeRide");
    assert_eq!(signals.time_of_day, TimeOfDay::Day);
    assert_eq!(signals.weather, None);
    assert!(signals.tags.is_empty());
    assert_eq!(signals.brands, None);
    assert_eq!(signals.semantic_context, None);
}

#[test]
fn test_sample_run_signals() {
    let signals = extract_signals(&common::sample_run()).unwrap();

    assert_eq!(signals.activity_type, "TrailRun");
    assert_eq!(signals.intensity, Intensity::Medium);
    assert_eq!(signals.elevation, Elevation::Rolling);
    assert_eq!(signals.time_of_day, TimeOfDay::Morning);
    assert_eq!(signals.weather, Some(Weather::Foggy));
    assert_eq!(signals.brands, Some(vec!["Hoka Speedgoat".to_string()]));
    // name tokens come before description tokens
    assert_eq!(
        signals.semantic_context,
        Some(
            ["morning", "run", "foggy", "loop", "around", "windy", "hill"]
                .map(String::from)
                .to_vec()
        )
    );
}

#[test]
fn test_blank_activity_types_are_rejected() {
    let activity = Activity {
        activity_type: Some("  ".to_string()),
        sport_type: Some(" ".to_string()),
        ..common::sample_run()
    };
    assert!(extract_signals(&activity).is_err());
}

#[test]
fn test_forbidden_tokens_are_sanitized_silently() {
    let activity = Activity {
        name: Some("Gun Club loop".to_string()),
        description: None,
        gear: None,
        ..common::sample_run()
    };

    let signals = extract_signals(&activity).expect("sanitized signals are returned");
    assert_eq!(
        signals.semantic_context,
        Some(vec!["club".to_string(), "loop".to_string()])
    );
}

#[test]
fn test_too_many_tokens_are_truncated() {
    let description = (0..30)
        .map(|i| format!("word{:02}", i))
        .collect::<Vec<_>>()
        .join(" ");
    let activity = Activity {
        name: None,
        description: Some(description),
        ..common::sample_run()
    };

    let signals = extract_signals(&activity).unwrap();
    let tokens = signals.semantic_context.unwrap();
    assert_eq!(tokens.len(), 20);
    assert_eq!(tokens[0], "word00");
    assert_eq!(tokens[19], "word19");
}

#[test]
fn test_tags_from_flags_and_text() {
    let activity = Activity {
        commute: Some(true),
        workout_type: Some(1),
        name: Some("Easy recovery jog with kid".to_string()),
        ..common::sample_run()
    };

    let signals = extract_signals(&activity).unwrap();
    for tag in ["commute", "race", "recovery", "easy", "with kid"] {
        assert!(signals.has_tag(tag), "missing tag {}", tag);
    }
}

#[test]
fn test_power_decides_when_pace_is_unknown() {
    let activity = Activity {
        moving_time: None,
        average_watts: Some(280.0),
        weighted_average_watts: Some(100.0),
        ..common::sample_mountain_bike_ride()
    };
    // average_watts is consulted first
    assert_eq!(classify_intensity(&activity), Intensity::High);
}

#[test]
fn test_activity_deserializes_from_strava_json() {
    let json = r#"{
        "id": 12345678987654321,
        "type": "Ride",
        "sport_type": "MountainBikeRide",
        "name": "Saratoga Gap",
        "distance": 28099.0,
        "moving_time": 4207,
        "elapsed_time": 4410,
        "total_elevation_gain": 516.0,
        "start_date": "2018-02-16T14:52:54Z",
        "start_date_local": "2018-02-16T06:52:54Z",
        "trainer": false,
        "commute": false,
        "gear": {"id": "b12345678987654321", "name": "Santa Cruz Hightower"}
    }"#;

    let activity: Activity = serde_json::from_str(json).unwrap();
    let signals = extract_signals(&activity).unwrap();

    assert_eq!(signals.time_of_day, TimeOfDay::Morning);
    assert_eq!(signals.elevation, Elevation::Mountainous);
    assert_eq!(
        signals.brands,
        Some(vec!["Santa Cruz Hightower".to_string()])
    );
}

#[test]
fn test_fixture_activity() {
    let content = std::fs::read_to_string("tests/fixtures/activity_saratoga_gap.json")
        .expect("Failed to read fixture");
    let activity: Activity = serde_json::from_str(&content).expect("Failed to parse fixture");

    let signals = extract_signals(&activity).unwrap();

    // fog outranks sun when both are mentioned
    assert_eq!(signals.weather, Some(Weather::Foggy));
    assert_eq!(signals.intensity, Intensity::High);
    assert_eq!(signals.time_of_day, TimeOfDay::Morning);
    assert_eq!(signals.tags, vec!["intervals".to_string()]);
    assert_eq!(
        signals.semantic_context.as_deref().map(|t| &t[..3]),
        Some(&["saratoga".to_string(), "gap".to_string(), "skyline".to_string()][..])
    );
}

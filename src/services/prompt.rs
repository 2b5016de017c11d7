// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt composition from activity signals.
//!
//! Style and mood come from fixed rule tables evaluated top to bottom;
//! the first matching rule wins.

use crate::models::{
    ActivityImagePrompt, ActivitySignals, Elevation, ImageStyle, Intensity, TimeOfDay, Validation,
    Weather, MAX_PROMPT_LENGTH,
};
use crate::services::guardrails::{find_forbidden_content, validate_prompt};

const ELLIPSIS: &str = "...";
const ELLIPSIS_CHARS: usize = 3;

/// Semantic tokens worked into the scene.
const MAX_SCENE_TOKENS: usize = 3;

/// Activity types eligible for the high-intensity illustrated style.
const ILLUSTRATED_HIGH_INTENSITY_TYPES: &[&str] = &["Run", "Ride", "TrailRun"];

/// Style, mood, subject and scene before the text is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptComponents {
    pub style: ImageStyle,
    pub mood: String,
    pub subject: String,
    pub scene: String,
}

/// Subject and scene descriptions for a set of signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneComposition {
    pub subject: String,
    pub scene: String,
}

pub fn select_style(signals: &ActivitySignals) -> ImageStyle {
    if signals.has_tag("recovery") || signals.has_tag("easy") {
        return ImageStyle::Minimal;
    }

    if signals.weather == Some(Weather::Foggy) {
        return ImageStyle::Abstract;
    }

    if signals.elevation == Elevation::Mountainous {
        return ImageStyle::Illustrated;
    }

    if signals.intensity == Intensity::High
        && ILLUSTRATED_HIGH_INTENSITY_TYPES.contains(&signals.activity_type.as_str())
    {
        return ImageStyle::Illustrated;
    }

    ImageStyle::Cartoon
}

/// Tags first, then weather, then intensity.
pub fn select_mood(signals: &ActivitySignals) -> &'static str {
    const TAG_MOODS: &[(&str, &str)] = &[
        ("recovery", "calm"),
        ("race", "intense"),
        ("commute", "routine"),
        ("with kid", "playful"),
    ];

    if let Some((_, mood)) = TAG_MOODS.iter().find(|(tag, _)| signals.has_tag(tag)) {
        return mood;
    }

    match signals.weather {
        Some(Weather::Sunny) => return "energetic",
        Some(Weather::Rainy) => return "contemplative",
        Some(Weather::Foggy) => return "mysterious",
        None => {}
    }

    match signals.intensity {
        Intensity::Low => "calm",
        Intensity::High => "intense",
        Intensity::Medium => "focused",
    }
}

/// Describe who is in the picture and where.
///
/// Both strings are always non-empty: the subject falls back to
/// "athlete" and the scene always carries a terrain phrase.
pub fn compose_scene(signals: &ActivitySignals) -> SceneComposition {
    let mut subject = subject_for(&signals.activity_type).to_string();
    if signals.has_tag("with kid") {
        subject.push_str(" with a child");
    }

    let mut parts: Vec<String> = Vec::new();

    let terrain = if signals.has_tag("indoor") {
        "in a bright indoor training space"
    } else if signals.has_tag("commute") {
        "through quiet city streets"
    } else if is_water_sport(&signals.activity_type) {
        "across open water"
    } else {
        match signals.elevation {
            Elevation::Flat => "along a flat open path",
            Elevation::Rolling => "over rolling hills",
            Elevation::Mountainous => "among towering mountains",
        }
    };
    parts.push(terrain.to_string());

    parts.push(
        match signals.time_of_day {
            TimeOfDay::Morning => "in soft morning light",
            TimeOfDay::Day => "under bright daylight",
            TimeOfDay::Evening => "in warm evening light",
            TimeOfDay::Night => "under a starry night sky",
        }
        .to_string(),
    );

    if let Some(weather) = signals.weather {
        parts.push(
            match weather {
                Weather::Sunny => "on a sunny day",
                Weather::Rainy => "in gentle rain",
                Weather::Foggy => "through drifting fog",
            }
            .to_string(),
        );
    }

    if signals.has_tag("race") {
        parts.push("with a finish line ahead".to_string());
    }

    if let Some(tokens) = signals.semantic_context.as_deref() {
        let themes: Vec<&str> = tokens
            .iter()
            .map(String::as_str)
            .take(MAX_SCENE_TOKENS)
            .collect();
        if !themes.is_empty() {
            parts.push(format!("themes of {}", themes.join(", ")));
        }
    }

    if let Some(brand) = signals.brands.as_deref().and_then(|b| b.first()) {
        parts.push(format!("with {} gear", brand));
    }

    SceneComposition {
        subject,
        scene: parts.join(", "),
    }
}

/// Build `"{style} style, {subject}, {mood} mood, {scene}"`.
///
/// Over [`MAX_PROMPT_LENGTH`] characters only the scene is cut and an
/// ellipsis appended; the style/subject/mood prefix is never altered.
pub fn assemble_prompt(components: &PromptComponents) -> String {
    let prefix = format!(
        "{} style, {}, {} mood, ",
        components.style, components.subject, components.mood
    );
    let text = format!("{}{}", prefix, components.scene);

    if text.chars().count() <= MAX_PROMPT_LENGTH {
        return text;
    }

    let max_scene = MAX_PROMPT_LENGTH.saturating_sub(prefix.chars().count());
    let kept: String = components
        .scene
        .chars()
        .take(max_scene.saturating_sub(ELLIPSIS_CHARS))
        .collect();

    format!("{}{}{}", prefix, kept, ELLIPSIS)
}

/// Generate a guardrail-checked prompt. Never fails.
///
/// Returns the composed prompt when valid, the sanitized prompt when one
/// exists, and the fixed default prompt otherwise.
pub fn generate_prompt(signals: &ActivitySignals) -> ActivityImagePrompt {
    let style = select_style(signals);
    let mood = select_mood(signals).to_string();
    let SceneComposition { subject, scene } = compose_scene(signals);

    let components = PromptComponents {
        style,
        mood,
        subject,
        scene,
    };
    let text = assemble_prompt(&components);

    let prompt = ActivityImagePrompt {
        style: components.style.to_string(),
        mood: components.mood,
        subject: components.subject,
        scene: components.scene,
        text,
    };

    match validate_prompt(&prompt) {
        Validation::Valid(prompt) => prompt,
        Validation::Sanitized { value, errors } => {
            tracing::warn!(
                errors = ?errors,
                forbidden = ?find_forbidden_content(&value.text),
                "Using sanitized prompt"
            );
            value
        }
        Validation::Invalid(errors) => {
            tracing::warn!(errors = ?errors, "Prompt rejected, using default prompt");
            ActivityImagePrompt::fallback()
        }
    }
}

fn subject_for(activity_type: &str) -> &'static str {
    match activity_type {
        "Run" | "VirtualRun" => "runner",
        "TrailRun" => "trail runner",
        "Ride" | "VirtualRide" | "EBikeRide" | "GravelRide" | "Velomobile" => "cyclist",
        "MountainBikeRide" | "EMountainBikeRide" => "mountain biker",
        "Swim" => "swimmer",
        "Hike" => "hiker",
        "Walk" => "walker",
        "AlpineSki" | "BackcountrySki" | "NordicSki" => "skier",
        "Snowboard" => "snowboarder",
        "Rowing" | "Canoeing" | "Kayaking" | "StandUpPaddling" => "paddler",
        "Yoga" => "yoga practitioner",
        _ => "athlete",
    }
}

fn is_water_sport(activity_type: &str) -> bool {
    matches!(
        activity_type,
        "Swim" | "Rowing" | "Canoeing" | "Kayaking" | "StandUpPaddling" | "Surfing"
    )
}

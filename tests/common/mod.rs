// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use activity_imagegen::config::Config;
use activity_imagegen::models::{Activity, Gear};
use activity_imagegen::routes::create_router;
use activity_imagegen::services::{ImageProvider, ProviderError};
use activity_imagegen::AppState;
use futures_util::future::BoxFuture;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[allow(dead_code)]
pub const FAKE_IMAGE: &str = "data:image/png;base64,ZmFrZS1pbWFnZQ==";

/// Provider that replays a script of outcomes and records every prompt.
///
/// `true` entries succeed, `false` entries fail; once the script runs out
/// every call succeeds.
#[allow(dead_code)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<bool>>,
    delay: Option<Duration>,
    pub prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedProvider {
    pub fn new(script: &[bool]) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.iter().copied().collect()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn always_ok() -> Arc<Self> {
        Self::new(&[])
    }

    pub fn always_failing() -> Arc<Self> {
        Self::new(&[false; 16])
    }

    /// Provider whose every call takes `delay` before succeeding.
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            delay: Some(delay),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ImageProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let ok = self.script.lock().unwrap().pop_front().unwrap_or(true);
            if ok {
                Ok(FAKE_IMAGE.to_string())
            } else {
                Err(ProviderError::Status { status: 500 })
            }
        })
    }
}

/// Config pointing Strava at a closed local port.
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        strava_api_base_url: "http://127.0.0.1:9".to_string(),
        ..Config::test_default()
    }
}

/// Create a test app with a scripted provider that always succeeds.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_provider(ScriptedProvider::always_ok())
}

#[allow(dead_code)]
pub fn create_test_app_with_provider(
    provider: Arc<ScriptedProvider>,
) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::with_provider(test_config(), provider));
    (create_router(state.clone()), state)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Morning trail run with an easy pace.
#[allow(dead_code)]
pub fn sample_run() -> Activity {
    Activity {
        id: 1001,
        activity_type: Some("Run".to_string()),
        sport_type: Some("TrailRun".to_string()),
        name: Some("Morning Run".to_string()),
        description: Some("Foggy loop around Windy Hill".to_string()),
        distance: Some(10_000.0),
        moving_time: Some(3_000.0),
        total_elevation_gain: Some(320.0),
        start_date: Some("2024-05-01T14:30:00Z".to_string()),
        start_date_local: Some("2024-05-01T07:30:00Z".to_string()),
        gear: Some(Gear {
            name: Some("Hoka Speedgoat".to_string()),
        }),
        ..Default::default()
    }
}

/// Mountain bike ride with a big climb.
#[allow(dead_code)]
pub fn sample_mountain_bike_ride() -> Activity {
    Activity {
        id: 2002,
        activity_type: Some("Ride".to_string()),
        sport_type: Some("MountainBikeRide".to_string()),
        distance: Some(28_099.0),
        moving_time: Some(4_207.0),
        total_elevation_gain: Some(516.0),
        ..Default::default()
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity Image Generator API Server
//!
//! Fetches Strava activities, derives a safe image prompt from each and
//! generates an illustration through the configured image provider.

use activity_imagegen::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Activity Image Generator API");

    // Resolve the image provider; an unknown name is a startup failure
    let state = AppState::from_config(config.clone()).expect("Failed to resolve image provider");
    tracing::info!(
        provider = state.generator.provider_name(),
        timeout_secs = config.image_provider_timeout.as_secs(),
        "Image provider initialized"
    );

    // Build router
    let app = activity_imagegen::routes::create_router(Arc::new(state));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("activity_imagegen=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}

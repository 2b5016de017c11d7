// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (Strava token, security headers).

pub mod auth;
pub mod security;

pub use auth::{require_strava_token, StravaToken};

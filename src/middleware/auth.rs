// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava access token middleware.
//!
//! The token is passed straight through to the Strava API; it is never
//! stored or logged.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

/// Cookie holding the Strava access token.
pub const TOKEN_COOKIE: &str = "strava_access_token";

/// Strava access token for the current request.
#[derive(Clone)]
pub struct StravaToken(pub String);

impl std::fmt::Debug for StravaToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StravaToken(..)")
    }
}

/// Middleware that requires a Strava access token.
pub async fn require_strava_token(
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Try cookie first, then header
    let token = match jar.get(TOKEN_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string)
            .ok_or(StatusCode::UNAUTHORIZED)?,
    };

    let token = token.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    request
        .extensions_mut()
        .insert(StravaToken(token.to_string()));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::{routing::get, Extension, Router};
    use tower::ServiceExt; // for oneshot

    fn app() -> Router {
        Router::new()
            .route(
                "/",
                get(|Extension(token): Extension<StravaToken>| async move { token.0 }),
            )
            .layer(axum::middleware::from_fn(require_strava_token))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_cookie_token() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::COOKIE, "strava_access_token=abc123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "abc123");
    }

    #[tokio::test]
    async fn test_cookie_preferred_over_header() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::COOKIE, "strava_access_token=from-cookie")
                    .header(header::AUTHORIZATION, "Bearer from-header")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "from-cookie");
    }

    #[tokio::test]
    async fn test_bearer_token() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::AUTHORIZATION, "Bearer xyz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "xyz");
    }

    #[tokio::test]
    async fn test_missing_or_malformed_token() {
        for auth in [None, Some("Basic dXNlcjpwYXNz"), Some("Bearer   ")] {
            let mut builder = Request::builder().uri("/");
            if let Some(auth) = auth {
                builder = builder.header(header::AUTHORIZATION, auth);
            }
            let response = app()
                .oneshot(builder.body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{:?}", auth);
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        assert_eq!(
            format!("{:?}", StravaToken("secret".to_string())),
            "StravaToken(..)"
        );
    }
}

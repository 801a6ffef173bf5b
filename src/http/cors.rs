//! Cross-origin policy for the browser-facing endpoints.
//!
//! # Responsibilities
//! - Answer allowed origins with their own origin
//! - Answer everything else with the first allow-listed origin, never a
//!   reflection of the caller
//! - Short-circuit OPTIONS preflights with headers only and no body
//!
//! # Design Decisions
//! - Preview deployments are admitted by an optional https suffix match
//!   in addition to the exact allow-list

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::config::CorsConfig;
use crate::http::server::AppState;

const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
const ALLOW_METHODS: &str = "POST, OPTIONS";

/// Pick the origin to answer with: the caller's, if allow-listed, else
/// the first configured origin.
pub fn response_origin<'a>(config: &'a CorsConfig, origin: Option<&'a str>) -> Option<&'a str> {
    let fallback = config.allowed_origins.first().map(String::as_str);

    let Some(origin) = origin else {
        return fallback;
    };

    if config.allowed_origins.iter().any(|o| o == origin) {
        return Some(origin);
    }

    if let Some(suffix) = &config.preview_origin_suffix {
        if origin.starts_with("https://") && origin.ends_with(suffix.as_str()) {
            return Some(origin);
        }
    }

    fallback
}

fn apply_headers(response: &mut Response, allowed_origin: &str) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(allowed_origin) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
}

/// Middleware for the intake routes: preflight short-circuit plus CORS
/// headers on every response.
pub async fn cors_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let allowed = response_origin(&state.config.cors, origin.as_deref()).map(str::to_owned);

    let mut response = if request.method() == Method::OPTIONS {
        let mut preflight = Response::new(Body::empty());
        *preflight.status_mut() = StatusCode::OK;
        preflight
    } else {
        next.run(request).await
    };

    if let Some(allowed) = allowed {
        apply_headers(&mut response, &allowed);
    }
    response
}

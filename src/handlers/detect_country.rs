//! Country/language detection endpoint.

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use serde::Serialize;

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::security::{client_ip, hash_ip};

#[derive(Debug, Serialize)]
pub struct DetectCountryResponse {
    pub language: String,
    #[serde(rename = "countryCode")]
    pub country_code: String,
    pub detected: bool,
}

/// Resolve a language preference for the caller.
///
/// Always answers 200: lookup failures degrade to the anchor-country
/// default inside the geo client.
pub async fn detect_country(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let ip = client_ip(&headers);
    let ip_hash = hash_ip(&ip);
    tracing::info!(ip_hash = %ip_hash, "Resolving country");

    let answer = state.geo.resolve(&ip).await;

    tracing::info!(
        ip_hash = %ip_hash,
        country = %answer.country_code,
        language = %answer.language,
        detected = answer.detected,
        "Country resolved"
    );
    metrics::record_geo_lookup(answer.detected);
    metrics::record_request("detect-country", 200);

    Json(DetectCountryResponse {
        language: answer.language,
        country_code: answer.country_code,
        detected: answer.detected,
    })
}

//! Metrics collection and exposition.
//!
//! # Metrics
//! - `intake_requests_total` (counter): requests by endpoint and status
//! - `intake_rate_limited_total` (counter): rejections by limiter scope
//! - `intake_upload_rejected_total` (counter): upload rejections by gate
//! - `intake_geo_lookups_total` (counter): lookups by outcome

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(endpoint: &'static str, status: u16) {
    counter!(
        "intake_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_rate_limited(scope: &'static str) {
    counter!("intake_rate_limited_total", "scope" => scope).increment(1);
}

pub fn record_upload_rejected(gate: &'static str) {
    counter!("intake_upload_rejected_total", "gate" => gate).increment(1);
}

pub fn record_geo_lookup(detected: bool) {
    let outcome = if detected { "detected" } else { "fallback" };
    counter!("intake_geo_lookups_total", "outcome" => outcome).increment(1);
}

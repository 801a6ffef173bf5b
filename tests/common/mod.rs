//! Shared utilities for integration testing.
#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{routing::get, Router};
use tokio::net::TcpListener;

use awards_intake::config::IntakeConfig;
use awards_intake::http::server::AppState;
use awards_intake::lifecycle::Shutdown;
use awards_intake::HttpServer;

pub const ADMIN_KEY: &str = "test-admin-key";
pub const REVIEWER_KEY: &str = "test-reviewer-key";
pub const ORIGIN: &str = "https://awards.test";

/// Baseline config for tests: memory stores, admin enabled, metrics
/// off, and the geolocation endpoint pointed at a dead port with a
/// short bound so lookups fall back quickly unless a stub is wired in.
pub fn test_config() -> IntakeConfig {
    let mut config = IntakeConfig::default();
    config.cors.allowed_origins = vec![ORIGIN.to_string()];
    config.admin.enabled = true;
    config.admin.api_key = ADMIN_KEY.to_string();
    config.admin.reviewer_keys = vec![REVIEWER_KEY.to_string()];
    config.observability.metrics_enabled = false;
    config.geo.endpoint = "http://127.0.0.1:9".to_string();
    config.geo.lookup_timeout_ms = 200;
    config
}

/// Bind an ephemeral port and serve the gateway on it.
pub async fn spawn_gateway(config: IntakeConfig) -> (SocketAddr, Shutdown) {
    let state = AppState::new(config).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(state);

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    (addr, shutdown)
}

/// Serve a canned geolocation response for any address path.
pub async fn spawn_geo_stub(body: &'static str) -> SocketAddr {
    let app = Router::new().route(
        "/{ip}",
        get(move || async move {
            (
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                body,
            )
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A submission body that passes every field gate.
pub fn valid_submission() -> serde_json::Value {
    serde_json::json!({
        "name": "Maria Silva",
        "job_title": "Safety Engineer",
        "company": "Acme Mining",
        "email": "maria.silva@example.com",
        "phone": "+55 (11) 99999-0000",
        "project_title": "Zero-incident turnaround",
        "current_scenario": "High incident rate across three plants.",
        "solution_applied": "Rolled out a new lockout/tagout procedure.",
        "results_obtained": "Incidents down 80% in six months.",
        "main_learning": "Training cadence matters more than tooling.",
        "file_urls": []
    })
}

/// POST a submission body from a fixed client address.
pub async fn post_submission(
    client: &reqwest::Client,
    addr: SocketAddr,
    body: &serde_json::Value,
    client_ip: &str,
) -> reqwest::Response {
    client
        .post(format!("http://{addr}/create-submission"))
        .header("x-forwarded-for", client_ip)
        .json(body)
        .send()
        .await
        .expect("gateway unreachable")
}

/// POST one multipart upload from a fixed client address.
pub async fn post_upload(
    client: &reqwest::Client,
    addr: SocketAddr,
    filename: &str,
    bytes: Vec<u8>,
    file_count: u64,
    client_ip: &str,
) -> reqwest::Response {
    let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
    let form = reqwest::multipart::Form::new()
        .part("file", part)
        .text("fileCount", file_count.to_string());

    client
        .post(format!("http://{addr}/upload-submission-file"))
        .header("x-forwarded-for", client_ip)
        .multipart(form)
        .send()
        .await
        .expect("gateway unreachable")
}

pub fn pdf_bytes() -> Vec<u8> {
    let mut buf = b"%PDF-1.7\n".to_vec();
    buf.resize(64, b' ');
    buf
}

pub fn jpeg_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0xFF, 0xD8, 0xFF, 0xE0];
    buf.resize(len.max(16), 0);
    buf
}

pub fn png_bytes() -> Vec<u8> {
    let mut buf = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    buf.resize(64, 0);
    buf
}

pub fn mp4_bytes() -> Vec<u8> {
    let mut buf = vec![0x00, 0x00, 0x00, 0x18];
    buf.extend_from_slice(b"ftypisom");
    buf.resize(64, 0);
    buf
}

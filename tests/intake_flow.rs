//! End-to-end flow tests: language detection, submission intake, the
//! upload → submission round trip, and the review surface.

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn detect_country_falls_back_when_lookup_unreachable() {
    // test_config points the lookup at a dead port.
    let (addr, shutdown) = common::spawn_gateway(common::test_config()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/detect-country"))
        .header("x-forwarded-for", "203.0.113.50")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["language"], "pt");
    assert_eq!(body["countryCode"], "BR");
    assert_eq!(body["detected"], false);

    shutdown.trigger();
}

#[tokio::test]
async fn detect_country_maps_anchor_and_other_countries() {
    let geo = common::spawn_geo_stub(r#"{"status":"success","countryCode":"BR"}"#).await;
    let mut config = common::test_config();
    config.geo.endpoint = format!("http://{geo}");
    let (addr, shutdown) = common::spawn_gateway(config).await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .post(format!("http://{addr}/detect-country"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["language"], "pt");
    assert_eq!(body["detected"], true);
    shutdown.trigger();

    let geo = common::spawn_geo_stub(r#"{"status":"success","countryCode":"AR"}"#).await;
    let mut config = common::test_config();
    config.geo.endpoint = format!("http://{geo}");
    let (addr, shutdown) = common::spawn_gateway(config).await;

    let body: serde_json::Value = client
        .post(format!("http://{addr}/detect-country"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["language"], "es");
    assert_eq!(body["countryCode"], "AR");
    shutdown.trigger();
}

#[tokio::test]
async fn detect_country_treats_failed_status_as_fallback() {
    let geo = common::spawn_geo_stub(r#"{"status":"fail"}"#).await;
    let mut config = common::test_config();
    config.geo.endpoint = format!("http://{geo}");
    let (addr, shutdown) = common::spawn_gateway(config).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/detect-country"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["countryCode"], "BR");
    assert_eq!(body["detected"], false);

    shutdown.trigger();
}

#[tokio::test]
async fn submission_is_accepted_and_visible_to_reviewers() {
    let (addr, shutdown) = common::spawn_gateway(common::test_config()).await;
    let client = reqwest::Client::new();

    let response =
        common::post_submission(&client, addr, &common::valid_submission(), "198.51.100.1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    let id = body["id"].as_str().unwrap().to_string();

    let record: serde_json::Value = client
        .get(format!("http://{addr}/admin/submissions/{id}"))
        .bearer_auth(common::ADMIN_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(record["status"], "pending");
    assert_eq!(record["email"], "maria.silva@example.com");

    shutdown.trigger();
}

#[tokio::test]
async fn upload_then_submission_round_trip() {
    let (addr, shutdown) = common::spawn_gateway(common::test_config()).await;
    let client = reqwest::Client::new();

    let response =
        common::post_upload(&client, addr, "evidence.png", common::png_bytes(), 1, "198.51.100.2")
            .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    let file_path = body["filePath"].as_str().unwrap().to_string();
    assert!(file_path.starts_with("submissions/"));
    assert!(file_path.ends_with(".png"));

    let mut submission = common::valid_submission();
    submission["file_urls"] = serde_json::json!([file_path]);
    let response = common::post_submission(&client, addr, &submission, "198.51.100.2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let id = response.json::<serde_json::Value>().await.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    // The record's file list contains exactly the returned path.
    let record: serde_json::Value = client
        .get(format!("http://{addr}/admin/submissions/{id}"))
        .bearer_auth(common::REVIEWER_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(record["file_urls"], serde_json::json!([file_path]));

    // Reviewers can redeem a signed token for the stored bytes.
    let signed: serde_json::Value = client
        .post(format!("http://{addr}/admin/files/sign"))
        .bearer_auth(common::ADMIN_KEY)
        .json(&serde_json::json!({ "file_path": file_path }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let url = signed["url"].as_str().unwrap();

    let download = client
        .get(format!("http://{addr}{url}"))
        .bearer_auth(common::ADMIN_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(
        download.headers()["content-type"].to_str().unwrap(),
        "image/png"
    );
    assert_eq!(download.bytes().await.unwrap().to_vec(), common::png_bytes());

    shutdown.trigger();
}

#[tokio::test]
async fn review_status_workflow() {
    let (addr, shutdown) = common::spawn_gateway(common::test_config()).await;
    let client = reqwest::Client::new();

    let response =
        common::post_submission(&client, addr, &common::valid_submission(), "198.51.100.3").await;
    let id = response.json::<serde_json::Value>().await.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = client
        .post(format!("http://{addr}/admin/submissions/{id}/status"))
        .bearer_auth(common::REVIEWER_KEY)
        .json(&serde_json::json!({ "status": "approved" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let record: serde_json::Value = client
        .get(format!("http://{addr}/admin/submissions/{id}"))
        .bearer_auth(common::ADMIN_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(record["status"], "approved");

    // Outside the closed set → rejected, record untouched.
    let response = client
        .post(format!("http://{addr}/admin/submissions/{id}/status"))
        .bearer_auth(common::ADMIN_KEY)
        .json(&serde_json::json!({ "status": "archived" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    shutdown.trigger();
}

#[tokio::test]
async fn admin_routes_reject_unknown_credentials() {
    let (addr, shutdown) = common::spawn_gateway(common::test_config()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/admin/submissions"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .get(format!("http://{addr}/admin/submissions"))
        .bearer_auth("not-a-key")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    shutdown.trigger();
}

#[tokio::test]
async fn wrong_method_is_405() {
    let (addr, shutdown) = common::spawn_gateway(common::test_config()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/create-submission"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    shutdown.trigger();
}

#[tokio::test]
async fn cors_preflight_and_origin_scoping() {
    let (addr, shutdown) = common::spawn_gateway(common::test_config()).await;
    let client = reqwest::Client::new();

    // Preflight short-circuits with headers only.
    let response = client
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{addr}/create-submission"),
        )
        .header("origin", common::ORIGIN)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        common::ORIGIN
    );
    assert_eq!(response.content_length(), Some(0));

    // Disallowed origins are answered with the first allow-listed one.
    let response = client
        .post(format!("http://{addr}/detect-country"))
        .header("origin", "https://evil.example.net")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        common::ORIGIN
    );

    shutdown.trigger();
}

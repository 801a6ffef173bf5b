//! Submission validation and persistence endpoint.
//!
//! Ordered hard gates, first failure short-circuits:
//! identity → rate limit → field validation → insert.

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::security::{client_ip, hash_ip, RateDecision};
use crate::submission::SubmissionPayload;

#[derive(Debug, Serialize)]
pub struct SubmissionAccepted {
    pub success: bool,
    pub id: Uuid,
}

pub async fn create_submission(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmissionAccepted>, ApiError> {
    let ip_hash = hash_ip(&client_ip(&headers));
    tracing::info!(ip_hash = %ip_hash, "Submission attempt");

    let decision = state
        .submission_limiter
        .check(&ip_hash)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Rate limit check failed");
            metrics::record_request("create-submission", 500);
            ApiError::internal("Failed to check rate limit")
        })?;

    if let RateDecision::Limited { retry_after_secs } = decision {
        metrics::record_request("create-submission", 429);
        return Err(ApiError::RateLimited {
            message: format!(
                "Rate limit exceeded. Maximum {} submissions per hour.",
                state.submission_limiter.policy().max_attempts
            ),
            retry_after_secs: Some(retry_after_secs),
        });
    }

    // Validation completes fully in memory before any store mutation.
    let payload: SubmissionPayload = serde_json::from_slice(&body).map_err(|_| {
        metrics::record_request("create-submission", 400);
        ApiError::Validation("Request body must be a JSON object".to_string())
    })?;

    let record = payload.validate().map_err(|e| {
        tracing::info!(ip_hash = %ip_hash, error = %e, "Submission rejected by validation");
        metrics::record_request("create-submission", 400);
        ApiError::from(e)
    })?;

    tracing::info!(email = %record.email, "Validated submission");

    let id = state.submissions.insert(record).await.map_err(|e| {
        tracing::error!(error = %e, "Insert failed");
        metrics::record_request("create-submission", 500);
        ApiError::internal("Failed to create submission")
    })?;

    tracing::info!(id = %id, "Submission created");
    metrics::record_request("create-submission", 200);

    Ok(Json(SubmissionAccepted { success: true, id }))
}

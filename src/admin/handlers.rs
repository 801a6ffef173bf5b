//! Review surface handlers: list, inspect, status changes, and signed
//! file downloads.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::server::AppState;
use crate::store::StoreError;
use crate::submission::{SubmissionRecord, SubmissionStatus};

pub async fn list_submissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubmissionRecord>>, ApiError> {
    let records = state.submissions.list().await.map_err(|e| {
        tracing::error!(error = %e, "Listing submissions failed");
        ApiError::internal("Failed to list submissions")
    })?;
    Ok(Json(records))
}

pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmissionRecord>, ApiError> {
    match state.submissions.get(id).await {
        Ok(record) => Ok(Json(record)),
        Err(StoreError::NotFound) => Err(ApiError::NotFound),
        Err(e) => {
            tracing::error!(error = %e, "Fetching submission failed");
            Err(ApiError::internal("Failed to fetch submission"))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// Move a submission through the review workflow. The status set is
/// closed; anything outside it is a validation error.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let status: SubmissionStatus = update.status.parse().map_err(|_| {
        ApiError::Validation(
            "Status must be one of pending, under_review, approved, rejected".to_string(),
        )
    })?;

    match state.submissions.update_status(id, status).await {
        Ok(()) => {
            tracing::info!(id = %id, status = %status, "Submission status updated");
            Ok(Json(json!({ "success": true })))
        }
        Err(StoreError::NotFound) => Err(ApiError::NotFound),
        Err(e) => {
            tracing::error!(error = %e, "Status update failed");
            Err(ApiError::internal("Failed to update status"))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SignRequest {
    pub file_path: String,
}

#[derive(Debug, Serialize)]
pub struct SignedFile {
    pub token: String,
    pub url: String,
    pub expires_in_secs: u64,
}

/// Issue a time-boxed download token for a stored attachment.
pub async fn sign_file(
    State(state): State<AppState>,
    Json(request): Json<SignRequest>,
) -> Result<Json<SignedFile>, ApiError> {
    let ttl_secs = state.config.storage.signed_url_ttl_secs;
    let token = match state
        .blobs
        .issue_token(&request.file_path, Duration::from_secs(ttl_secs))
        .await
    {
        Ok(token) => token,
        Err(StoreError::NotFound) => return Err(ApiError::NotFound),
        Err(e) => {
            tracing::error!(error = %e, "Signing failed");
            return Err(ApiError::internal("Failed to sign file"));
        }
    };

    Ok(Json(SignedFile {
        url: format!("/admin/files/{token}"),
        token,
        expires_in_secs: ttl_secs,
    }))
}

/// Redeem an unexpired token for the blob bytes with the verified
/// content type.
pub async fn fetch_file(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let blob = match state.blobs.redeem_token(&token).await {
        Ok(blob) => blob,
        Err(StoreError::NotFound) => return Err(ApiError::NotFound),
        Err(e) => {
            tracing::error!(error = %e, "Token redemption failed");
            return Err(ApiError::internal("Failed to fetch file"));
        }
    };

    let mut response = (StatusCode::OK, blob.bytes).into_response();
    if let Ok(value) = HeaderValue::from_str(&blob.content_type) {
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    Ok(response)
}

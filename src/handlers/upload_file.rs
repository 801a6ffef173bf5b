//! Attachment upload endpoint.
//!
//! Ordered gates: rate limit → declared count → size → extension →
//! content-type mapping → signature → store. The declared multipart
//! type is never consulted; the extension decides the expected type and
//! the payload bytes must prove it.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;

use crate::error::ApiError;
use crate::files::{
    content_type_for, extension_of, sniff::matches_signature, storage_name,
    ALLOWED_CONTENT_TYPES, ALLOWED_EXTENSIONS, MAX_FILES_PER_SUBMISSION, MAX_FILE_SIZE,
};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::security::{client_ip, hash_ip, RateDecision};

#[derive(Debug, Serialize)]
pub struct UploadAccepted {
    pub success: bool,
    #[serde(rename = "filePath")]
    pub file_path: String,
    pub message: &'static str,
}

struct UploadForm {
    filename: String,
    data: Bytes,
    declared_count: u64,
}

pub async fn upload_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<UploadAccepted>, ApiError> {
    let ip_hash = hash_ip(&client_ip(&headers));
    tracing::info!(ip_hash = %ip_hash, "Upload request");

    let decision = state.upload_limiter.check(&ip_hash).await.map_err(|e| {
        tracing::error!(error = %e, "Rate limit check failed");
        metrics::record_request("upload-submission-file", 500);
        ApiError::internal("Failed to check rate limit")
    })?;

    if let RateDecision::Limited { retry_after_secs } = decision {
        metrics::record_request("upload-submission-file", 429);
        return Err(ApiError::RateLimited {
            message: "Too many upload attempts. Please try again later.".to_string(),
            retry_after_secs: Some(retry_after_secs),
        });
    }

    let form = read_form(multipart).await?;

    if form.declared_count > MAX_FILES_PER_SUBMISSION {
        return Err(reject(
            "file_count",
            format!("Maximum {MAX_FILES_PER_SUBMISSION} files allowed per submission"),
        ));
    }

    if form.data.len() > MAX_FILE_SIZE {
        tracing::info!(ip_hash = %ip_hash, size = form.data.len(), "Oversize upload rejected");
        return Err(reject("size", "File size exceeds 20MB limit".to_string()));
    }

    let extension = match extension_of(&form.filename) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => ext,
        _ => {
            tracing::info!(ip_hash = %ip_hash, filename = %form.filename, "Disallowed extension");
            return Err(reject(
                "extension",
                "Invalid file type. Allowed: PDF, JPG, PNG, MP4, MOV".to_string(),
            ));
        }
    };

    // Defensive: the extension gate should make this unreachable.
    let content_type = match content_type_for(&extension) {
        Some(ct) if ALLOWED_CONTENT_TYPES.contains(&ct) => ct,
        _ => return Err(reject("content_type", "Invalid file type".to_string())),
    };

    if !matches_signature(&form.data, content_type) {
        tracing::info!(
            ip_hash = %ip_hash,
            filename = %form.filename,
            expected = content_type,
            "Content signature mismatch"
        );
        return Err(reject(
            "signature",
            "File content does not match its extension".to_string(),
        ));
    }

    let path = format!(
        "{}/{}",
        state.config.storage.blob_prefix,
        storage_name(&extension)
    );

    state
        .blobs
        .put(&path, form.data.to_vec(), content_type)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Blob write failed");
            metrics::record_request("upload-submission-file", 500);
            ApiError::internal("Failed to upload file")
        })?;

    tracing::info!(ip_hash = %ip_hash, path = %path, "File stored");
    metrics::record_request("upload-submission-file", 200);

    Ok(Json(UploadAccepted {
        success: true,
        file_path: path,
        message: "File uploaded successfully",
    }))
}

fn reject(gate: &'static str, message: String) -> ApiError {
    metrics::record_upload_rejected(gate);
    metrics::record_request("upload-submission-file", 400);
    ApiError::Validation(message)
}

/// Pull the `file` and `fileCount` parts out of the multipart body.
async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut declared_count: u64 = 1;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| reject("multipart", "Malformed multipart body".to_string()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| reject("multipart", "Malformed multipart body".to_string()))?;
                file = Some((filename, data));
            }
            Some("fileCount") => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| reject("multipart", "Malformed multipart body".to_string()))?;
                declared_count = text.trim().parse().unwrap_or(1);
            }
            _ => {}
        }
    }

    let Some((filename, data)) = file else {
        return Err(reject("missing_file", "No file provided".to_string()));
    };

    Ok(UploadForm {
        filename,
        data,
        declared_count,
    })
}

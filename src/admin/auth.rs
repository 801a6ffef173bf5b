//! Admin-or-reviewer capability check.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::http::server::AppState;

/// Role granted to the presented credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewerRole {
    Admin,
    Reviewer,
}

/// Context attached to authenticated admin requests.
#[derive(Clone, Copy, Debug)]
pub struct ReviewerContext {
    pub role: ReviewerRole,
}

/// Bearer-token gate for every `/admin` route.
///
/// The predicate is "is admin or reviewer": the admin key and each
/// reviewer key both pass; everything else is rejected before any
/// handler runs.
pub async fn require_reviewer(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let admin = &state.config.admin;
    let role = match token {
        Some(t) if t == admin.api_key => ReviewerRole::Admin,
        Some(t) if admin.reviewer_keys.iter().any(|k| k == t) => ReviewerRole::Reviewer,
        _ => {
            tracing::warn!("Rejected admin request without a valid credential");
            return Err(ApiError::Unauthorized);
        }
    };

    request.extensions_mut().insert(ReviewerContext { role });
    Ok(next.run(request).await)
}

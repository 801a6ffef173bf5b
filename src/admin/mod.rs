//! Admin review surface.
//!
//! The dashboard re-verifies authorization server-side; these routes
//! are that trust boundary. Every route sits behind the
//! admin-or-reviewer check in `auth.rs`.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use self::auth::require_reviewer;
use self::handlers::*;
use crate::http::server::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/submissions", get(list_submissions))
        .route("/admin/submissions/{id}", get(get_submission))
        .route("/admin/submissions/{id}/status", post(update_status))
        .route("/admin/files/sign", post(sign_file))
        .route("/admin/files/{token}", get(fetch_file))
        .layer(middleware::from_fn_with_state(state, require_reviewer))
}

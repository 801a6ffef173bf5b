//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wire the counter/record/blob stores behind their traits
//! - Create the Axum router with all handlers and middleware
//! - Bind the server to a listener and serve with graceful shutdown
//!
//! # Design Decisions
//! - The shared Redis counter backs both limiters when configured;
//!   otherwise counters are process-local and best-effort
//! - The body limit sits above the attachment cap so the 20 MiB gate
//!   fires in the handler with a proper field-level error

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, middleware, routing::post, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin;
use crate::config::IntakeConfig;
use crate::error::ApiError;
use crate::geo::GeoClient;
use crate::handlers::{create_submission, detect_country, upload_file};
use crate::http::cors::cors_middleware;
use crate::security::{RateLimiter, RatePolicy};
use crate::store::memory::{MemoryBlobStore, MemoryRateStore, MemorySubmissionStore};
use crate::store::redis::RedisRateStore;
use crate::store::{BlobStore, RateStore, StoreError, SubmissionStore};

/// Request body ceiling: comfortably above the 20 MiB attachment cap
/// plus multipart framing, so oversize files reach the handler's own
/// gate instead of a framework rejection.
const BODY_LIMIT: usize = 32 * 1024 * 1024;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<IntakeConfig>,
    pub submission_limiter: Arc<RateLimiter>,
    pub upload_limiter: Arc<RateLimiter>,
    pub submissions: Arc<dyn SubmissionStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub geo: Arc<GeoClient>,
}

impl AppState {
    /// Wire stores and collaborators from configuration.
    pub async fn new(config: IntakeConfig) -> Result<Self, StoreError> {
        let rate_store: Arc<dyn RateStore> = match &config.storage.redis_url {
            Some(url) => Arc::new(RedisRateStore::connect(url).await?),
            None => {
                tracing::warn!(
                    "No shared counter store configured; rate limits are process-local"
                );
                Arc::new(MemoryRateStore::new())
            }
        };

        Self::with_stores(
            config,
            rate_store,
            Arc::new(MemorySubmissionStore::new()),
            Arc::new(MemoryBlobStore::new()),
        )
    }

    /// Wire explicit store implementations (test harnesses included).
    pub fn with_stores(
        config: IntakeConfig,
        rate_store: Arc<dyn RateStore>,
        submissions: Arc<dyn SubmissionStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Result<Self, StoreError> {
        let limits = &config.rate_limits;
        let submission_limiter = Arc::new(RateLimiter::new(
            rate_store.clone(),
            "submission",
            RatePolicy {
                max_attempts: limits.submission_max_attempts,
                window: Duration::from_secs(limits.submission_window_secs),
            },
        ));
        let upload_limiter = Arc::new(RateLimiter::new(
            rate_store,
            "upload",
            RatePolicy {
                max_attempts: limits.upload_max_attempts,
                window: Duration::from_secs(limits.upload_window_secs),
            },
        ));

        let geo = Arc::new(GeoClient::new(config.geo.clone()));

        Ok(Self {
            config: Arc::new(config),
            submission_limiter,
            upload_limiter,
            submissions,
            blobs,
            geo,
        })
    }
}

/// HTTP server for the intake gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given state.
    pub fn new(state: AppState) -> Self {
        let router = Self::build_router(state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let intake = Router::new()
            .route(
                "/detect-country",
                post(detect_country).fallback(method_not_allowed),
            )
            .route(
                "/create-submission",
                post(create_submission).fallback(method_not_allowed),
            )
            .route(
                "/upload-submission-file",
                post(upload_file).fallback(method_not_allowed),
            )
            .layer(middleware::from_fn_with_state(
                state.clone(),
                cors_middleware,
            ));

        let mut router = Router::new().merge(intake);
        if state.config.admin.enabled {
            router = router.merge(admin::router(state.clone()));
        }

        router
            .layer(TimeoutLayer::new(Duration::from_secs(
                state.config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::max(BODY_LIMIT))
            .with_state(state)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// JSON 405 for wrong-method calls to the intake endpoints.
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

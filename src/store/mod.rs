//! Platform boundary: the contracts the intake pipeline expects from
//! the hosted database/storage service.
//!
//! # Data Flow
//! ```text
//! handlers
//!     → RateStore (atomic attempt counting per window)
//!     → SubmissionStore (insert-with-id, reviewer reads/updates)
//!     → BlobStore (non-overwriting put, signed-token issue/redeem)
//! ```
//!
//! # Design Decisions
//! - Traits at the seam; the handlers never know which backing is wired
//! - `memory` backs tests and single-instance deployments; `redis`
//!   backs the counters when correctness must survive multi-instance
//!   deployment

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::submission::{NewSubmission, SubmissionRecord, SubmissionStatus};

pub mod memory;
pub mod redis;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("counter store error: {0}")]
    Counter(String),

    #[error("record store error: {0}")]
    Record(String),

    #[error("blob store error: {0}")]
    Blob(String),

    #[error("object already exists at {0}")]
    AlreadyExists(String),

    #[error("not found")]
    NotFound,
}

/// Outcome of counting one attempt against a window.
#[derive(Debug, Clone, Copy)]
pub struct WindowHit {
    /// Attempts recorded in the current window, this one included.
    pub count: u64,
    /// Seconds until the window expires.
    pub reset_in_secs: u64,
}

/// Atomic attempt counter keyed by client hash and scope.
///
/// `hit` must be a single atomic record-and-report: concurrent callers
/// for the same key observe distinct counts.
#[async_trait]
pub trait RateStore: Send + Sync {
    async fn hit(&self, key: &str, window: Duration) -> Result<WindowHit, StoreError>;
}

/// Submission persistence with reviewer-side reads.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a validated record with status `pending` and return the
    /// generated identifier.
    async fn insert(&self, record: NewSubmission) -> Result<Uuid, StoreError>;

    async fn get(&self, id: Uuid) -> Result<SubmissionRecord, StoreError>;

    /// All records, newest first.
    async fn list(&self) -> Result<Vec<SubmissionRecord>, StoreError>;

    async fn update_status(&self, id: Uuid, status: SubmissionStatus) -> Result<(), StoreError>;
}

/// A stored attachment with its verified content type.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub path: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Blob persistence with time-boxed download tokens.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write a blob, refusing to overwrite an existing object.
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<(), StoreError>;

    /// Issue a download token for an existing blob, valid for `ttl`.
    async fn issue_token(&self, path: &str, ttl: Duration) -> Result<String, StoreError>;

    /// Redeem an unexpired token for the blob it names.
    async fn redeem_token(&self, token: &str) -> Result<StoredBlob, StoreError>;
}

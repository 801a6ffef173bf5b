//! Fixed-window rate limiting over an attempt counter store.
//!
//! # Responsibilities
//! - Count each intake attempt against its (client-hash, window) record
//! - Decide admission and carry the retry hint for rejected attempts
//!
//! # Design Decisions
//! - The window is anchored at the first attempt and carried by the
//!   store; denied attempts never extend it
//! - Admission is `count <= max`, so a window never admits more than
//!   `max` regardless of concurrency

use std::sync::Arc;
use std::time::Duration;

use crate::observability::metrics;
use crate::store::{RateStore, StoreError};

/// One window's policy: how many attempts, over how long.
#[derive(Debug, Clone, Copy)]
pub struct RatePolicy {
    pub max_attempts: u64,
    pub window: Duration,
}

/// Admission decision for a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited { retry_after_secs: u64 },
}

/// Limiter for one scope (submissions or uploads), sharing a counter
/// store with every other instance of the service when that store is
/// backed by the shared platform.
pub struct RateLimiter {
    store: Arc<dyn RateStore>,
    scope: &'static str,
    policy: RatePolicy,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateStore>, scope: &'static str, policy: RatePolicy) -> Self {
        Self {
            store,
            scope,
            policy,
        }
    }

    pub fn policy(&self) -> RatePolicy {
        self.policy
    }

    /// Count this attempt and decide admission.
    pub async fn check(&self, client_hash: &str) -> Result<RateDecision, StoreError> {
        let key = format!("rl:{}:{}", self.scope, client_hash);
        let hit = self.store.hit(&key, self.policy.window).await?;

        if hit.count > self.policy.max_attempts {
            tracing::warn!(
                scope = self.scope,
                client = %client_hash,
                count = hit.count,
                "Rate limit exceeded"
            );
            metrics::record_rate_limited(self.scope);
            return Ok(RateDecision::Limited {
                retry_after_secs: hit.reset_in_secs,
            });
        }

        Ok(RateDecision::Allowed)
    }
}

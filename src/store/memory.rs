//! In-process store implementations.
//!
//! Back tests and single-instance deployments. The rate counter here is
//! explicitly best-effort across instances: it lives in process memory
//! and resets with the process.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::store::{
    BlobStore, RateStore, StoreError, StoredBlob, SubmissionStore, WindowHit,
};
use crate::submission::{NewSubmission, SubmissionRecord, SubmissionStatus};

struct WindowSlot {
    count: u64,
    reset_at: Instant,
}

/// Process-local attempt counter.
#[derive(Default)]
pub struct MemoryRateStore {
    windows: DashMap<String, WindowSlot>,
}

impl MemoryRateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateStore for MemoryRateStore {
    async fn hit(&self, key: &str, window: Duration) -> Result<WindowHit, StoreError> {
        let now = Instant::now();
        // The entry guard holds the shard lock, making reset-or-increment
        // atomic per key.
        let mut slot = self
            .windows
            .entry(key.to_string())
            .or_insert_with(|| WindowSlot {
                count: 0,
                reset_at: now + window,
            });

        if now >= slot.reset_at {
            slot.count = 0;
            slot.reset_at = now + window;
        }
        slot.count += 1;

        let remaining = slot.reset_at.saturating_duration_since(now);
        Ok(WindowHit {
            count: slot.count,
            reset_in_secs: remaining.as_secs_f64().ceil() as u64,
        })
    }
}

/// In-memory submission records.
#[derive(Default)]
pub struct MemorySubmissionStore {
    records: DashMap<Uuid, (u64, SubmissionRecord)>,
    seq: AtomicU64,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn insert(&self, record: NewSubmission) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);

        self.records.insert(
            id,
            (
                seq,
                SubmissionRecord {
                    id,
                    status: SubmissionStatus::Pending,
                    created_at,
                    fields: record,
                },
            ),
        );
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<SubmissionRecord, StoreError> {
        self.records
            .get(&id)
            .map(|entry| entry.value().1.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<SubmissionRecord>, StoreError> {
        let mut rows: Vec<(u64, SubmissionRecord)> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(rows.into_iter().map(|(_, record)| record).collect())
    }

    async fn update_status(&self, id: Uuid, status: SubmissionStatus) -> Result<(), StoreError> {
        match self.records.get_mut(&id) {
            Some(mut entry) => {
                entry.value_mut().1.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

struct TokenSlot {
    path: String,
    expires_at: Instant,
}

/// In-memory blob store with token-based downloads.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, (String, Vec<u8>)>,
    tokens: DashMap<String, TokenSlot>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        match self.blobs.entry(path.to_string()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(path.to_string())),
            Entry::Vacant(slot) => {
                slot.insert((content_type.to_string(), bytes));
                Ok(())
            }
        }
    }

    async fn issue_token(&self, path: &str, ttl: Duration) -> Result<String, StoreError> {
        if !self.blobs.contains_key(path) {
            return Err(StoreError::NotFound);
        }
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.insert(
            token.clone(),
            TokenSlot {
                path: path.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(token)
    }

    async fn redeem_token(&self, token: &str) -> Result<StoredBlob, StoreError> {
        let slot = self.tokens.get(token).ok_or(StoreError::NotFound)?;
        if Instant::now() >= slot.expires_at {
            drop(slot);
            self.tokens.remove(token);
            return Err(StoreError::NotFound);
        }
        let path = slot.path.clone();
        drop(slot);

        let blob = self.blobs.get(&path).ok_or(StoreError::NotFound)?;
        let (content_type, bytes) = blob.value().clone();
        Ok(StoredBlob {
            path,
            content_type,
            bytes,
        })
    }
}

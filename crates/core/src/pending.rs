// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured-but-unsynced records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::mapping;
use crate::record::{EntityKind, PresentationRecord, StorageRecord};

/// One captured measurement waiting for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingRecord {
    /// Content-derived identifier, unique within a queue.
    pub id: String,
    pub entity: EntityKind,
    /// The capture in presentation shape, exactly as entered.
    pub payload: PresentationRecord,
    pub captured_at: DateTime<Utc>,
    /// Always false while the record is queued.
    #[serde(default)]
    pub synced: bool,
    /// Failed delivery attempts so far.
    #[serde(default)]
    pub attempts: u32,
    /// Reason of the most recent failed attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl PendingRecord {
    /// Creates a fresh, never-attempted record.
    pub fn new(
        id: String,
        entity: EntityKind,
        payload: PresentationRecord,
        captured_at: DateTime<Utc>,
    ) -> Self {
        PendingRecord {
            id,
            entity,
            payload,
            captured_at,
            synced: false,
            attempts: 0,
            last_error: None,
        }
    }

    /// Converts the payload into the storage shape for submission.
    pub fn encode(&self) -> Result<StorageRecord> {
        mapping::encode(&self.payload, self.entity.mapping())
    }

    /// Notes a failed delivery attempt.
    pub fn record_failure(&mut self, error: impl Into<String>) {
        self.attempts = self.attempts.saturating_add(1);
        self.last_error = Some(error.into());
    }
}

/// Generate a record ID from entity kind, payload, and capture time.
/// Format: {entity}-{hash} where hash is the first 12 hex chars of
/// SHA256(payload + timestamp)
pub fn generate_id(
    entity: EntityKind,
    payload: &PresentationRecord,
    captured_at: &DateTime<Utc>,
) -> String {
    let body = serde_json::to_string(payload).unwrap_or_default();
    let input = format!("{}{}", body, captured_at.to_rfc3339());
    let hash = Sha256::digest(input.as_bytes());
    format!("{}-{}", entity.as_str(), hex::encode(&hash[..6]))
}

/// Generate a unique ID, handling collisions by appending incrementing suffix.
pub fn generate_unique_id<F>(
    entity: EntityKind,
    payload: &PresentationRecord,
    captured_at: &DateTime<Utc>,
    exists: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let base_id = generate_id(entity, payload, captured_at);

    if !exists(&base_id) {
        return base_id;
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id) {
            return id;
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "pending_tests.rs"]
mod tests;

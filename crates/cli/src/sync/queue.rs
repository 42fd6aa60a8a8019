// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline queue for captured records that have not reached the remote.
//!
//! The whole queue is serialized as JSONL under a single storage key and
//! rewritten on every mutation. A mutation only lands in memory after the
//! storage write succeeded, so the in-memory list never runs ahead of what
//! survives a restart.

use chrono::{DateTime, Utc};
use tracing::warn;

use canopy_core::pending::generate_unique_id;
use canopy_core::{jsonl, EntityKind, PendingRecord, PresentationRecord, Storage};

use crate::error::{Error, Result};

/// Storage key holding the queue.
pub const QUEUE_KEY: &str = "pending";

/// Durable FIFO of [`PendingRecord`]s.
pub struct OfflineQueue {
    storage: Box<dyn Storage>,
    records: Vec<PendingRecord>,
    load_error: Option<Error>,
}

impl OfflineQueue {
    /// Opens the queue persisted in `storage`.
    ///
    /// Unreadable or malformed contents never fail the open: the queue
    /// starts empty and the problem is kept for [`OfflineQueue::load_error`].
    pub fn open(storage: Box<dyn Storage>) -> Self {
        let (records, load_error) = match load(storage.as_ref()) {
            Ok(records) => (records, None),
            Err(e) => {
                warn!(error = %e, "pending queue unreadable, starting empty");
                (Vec::new(), Some(e))
            }
        };
        OfflineQueue {
            storage,
            records,
            load_error,
        }
    }

    /// Error hit while loading the persisted queue, if any.
    pub fn load_error(&self) -> Option<&Error> {
        self.load_error.as_ref()
    }

    /// Appends a capture stamped with the current time.
    pub fn enqueue(
        &mut self,
        entity: EntityKind,
        payload: PresentationRecord,
    ) -> Result<PendingRecord> {
        self.enqueue_at(entity, payload, Utc::now())
    }

    /// Appends a capture with an explicit capture time.
    pub fn enqueue_at(
        &mut self,
        entity: EntityKind,
        payload: PresentationRecord,
        captured_at: DateTime<Utc>,
    ) -> Result<PendingRecord> {
        let id = generate_unique_id(entity, &payload, &captured_at, |id| self.contains(id));
        let record = PendingRecord::new(id, entity, payload, captured_at);

        let mut next = self.records.clone();
        next.push(record.clone());
        self.commit(next)?;
        Ok(record)
    }

    /// Pending records, oldest first.
    pub fn list(&self) -> &[PendingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True if at least one record awaits delivery.
    pub fn has_pending(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Removes the first `count` records. Returns how many were removed.
    pub fn remove_front(&mut self, count: usize) -> Result<usize> {
        let count = count.min(self.records.len());
        if count == 0 {
            return Ok(0);
        }
        let next = self.records[count..].to_vec();
        self.commit(next)?;
        Ok(count)
    }

    /// Removes exactly the records with the given ids. Returns how many
    /// were removed; unknown ids are ignored.
    pub fn remove_ids(&mut self, ids: &[String]) -> Result<usize> {
        let next: Vec<PendingRecord> = self
            .records
            .iter()
            .filter(|r| !ids.contains(&r.id))
            .cloned()
            .collect();
        let removed = self.records.len() - next.len();
        if removed > 0 {
            self.commit(next)?;
        }
        Ok(removed)
    }

    /// Notes a failed attempt on each `(id, reason)` pair still queued.
    pub fn record_failures(&mut self, failures: &[(String, String)]) -> Result<()> {
        if failures.is_empty() {
            return Ok(());
        }
        let mut next = self.records.clone();
        for (id, reason) in failures {
            if let Some(record) = next.iter_mut().find(|r| &r.id == id) {
                record.record_failure(reason.as_str());
            }
        }
        self.commit(next)
    }

    /// Drops every queued record.
    pub fn clear(&mut self) -> Result<()> {
        self.commit(Vec::new())
    }

    fn commit(&mut self, next: Vec<PendingRecord>) -> Result<()> {
        let contents = jsonl::to_string(&next)?;
        self.storage.write(QUEUE_KEY, &contents)?;
        self.records = next;
        self.load_error = None;
        Ok(())
    }
}

fn load(storage: &dyn Storage) -> Result<Vec<PendingRecord>> {
    let contents = storage
        .read(QUEUE_KEY)
        .map_err(|e| Error::Serialization(e.to_string()))?;
    match contents {
        Some(contents) => {
            jsonl::from_str(&contents).map_err(|e| Error::Serialization(e.to_string()))
        }
        None => Ok(Vec::new()),
    }
}

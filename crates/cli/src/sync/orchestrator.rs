// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Drains the offline queue into the remote store.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use canopy_core::{PendingRecord, StorageRecord};

use super::remote::SubmitError;
use crate::context::SyncContext;
use crate::error::{Error, Result};

/// Which records leave the queue after a drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalPolicy {
    /// Remove exactly the records whose submission succeeded.
    #[default]
    Identity,
    /// Remove as many records from the front as were synced, whichever
    /// records those are. Kept for compatibility with older queues.
    FrontTruncate,
}

/// A record that could not be delivered during a drain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordFailure {
    pub record: PendingRecord,
    pub error: SubmitError,
}

/// Outcome of one drain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncResult {
    /// Records accepted by the remote.
    pub synced: usize,
    /// Records in the queue when the drain started.
    pub total: usize,
    /// Per-record failures; `None` when every record went through.
    pub errors: Option<Vec<RecordFailure>>,
}

impl SyncResult {
    pub fn failed(&self) -> usize {
        self.errors.as_ref().map_or(0, Vec::len)
    }
}

/// Delivers queued records in capture order.
pub struct SyncOrchestrator {
    ctx: SyncContext,
    policy: RemovalPolicy,
    drain_lock: tokio::sync::Mutex<()>,
}

impl SyncOrchestrator {
    pub fn new(ctx: SyncContext, policy: RemovalPolicy) -> Self {
        SyncOrchestrator {
            ctx,
            policy,
            drain_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn policy(&self) -> RemovalPolicy {
        self.policy
    }

    /// Submits every record queued at the time of the call.
    ///
    /// Fails with [`Error::Offline`] without touching the queue when the
    /// device is offline. All records are encoded before the first
    /// submission, so a record that cannot be mapped aborts the drain
    /// with nothing sent. Remote failures do not stop the drain; they are
    /// collected in [`SyncResult::errors`] and noted on the queued record.
    pub async fn drain(&self) -> Result<SyncResult> {
        let _drain = self.drain_lock.lock().await;

        if !self.ctx.connectivity().is_online() {
            return Err(Error::Offline);
        }

        let snapshot: Vec<PendingRecord> = self.ctx.queue().list().to_vec();
        let total = snapshot.len();
        if total == 0 {
            debug!("nothing to sync");
            return Ok(SyncResult {
                synced: 0,
                total: 0,
                errors: None,
            });
        }

        let encoded = snapshot
            .into_iter()
            .map(|record| -> Result<(PendingRecord, StorageRecord)> {
                let storage = record.encode()?;
                Ok((record, storage))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut synced_ids = Vec::new();
        let mut failures = Vec::new();
        for (record, storage) in encoded {
            debug!(id = %record.id, entity = %record.entity, "submitting record");
            match self.ctx.remote().submit(record.entity, &storage).await {
                Ok(()) => synced_ids.push(record.id),
                Err(error) => {
                    warn!(id = %record.id, error = %error, "record not synced");
                    failures.push(RecordFailure { record, error });
                }
            }
        }

        self.settle(&synced_ids, &failures)?;

        info!(
            synced = synced_ids.len(),
            failed = failures.len(),
            total,
            "sync finished"
        );
        Ok(SyncResult {
            synced: synced_ids.len(),
            total,
            errors: if failures.is_empty() {
                None
            } else {
                Some(failures)
            },
        })
    }

    fn settle(&self, synced_ids: &[String], failures: &[RecordFailure]) -> Result<()> {
        let failed: Vec<(String, String)> = failures
            .iter()
            .map(|f| (f.record.id.clone(), f.error.to_string()))
            .collect();

        let mut queue = self.ctx.queue();
        queue.record_failures(&failed)?;
        match self.policy {
            RemovalPolicy::Identity => queue.remove_ids(synced_ids)?,
            RemovalPolicy::FrontTruncate => queue.remove_front(synced_ids.len())?,
        };
        Ok(())
    }
}

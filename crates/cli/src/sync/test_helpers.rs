// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync and capture tests.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::Notify;

use canopy_core::{EntityKind, MemoryStorage, PresentationRecord, Storage, StorageRecord};

use super::remote::{RemoteSubmit, SubmitError, SubmitFuture};
use super::{Connectivity, OfflineQueue};
use crate::context::SyncContext;

type SubmitHook = Box<dyn Fn(usize) + Send + Sync>;

/// Scripted remote: records every call and rejects chosen tree ids.
#[derive(Default)]
pub struct MockRemote {
    calls: Mutex<Vec<(EntityKind, StorageRecord)>>,
    rejected: Mutex<Vec<Value>>,
    fail_all: Mutex<bool>,
    gate: Option<Arc<Notify>>,
    on_submit: Option<SubmitHook>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every submission waits for `gate` to be notified before answering.
    pub fn gated(gate: Arc<Notify>) -> Self {
        MockRemote {
            gate: Some(gate),
            ..Self::default()
        }
    }

    /// Runs `hook` with the call index before answering each submission.
    pub fn with_hook(hook: impl Fn(usize) + Send + Sync + 'static) -> Self {
        MockRemote {
            on_submit: Some(Box::new(hook)),
            ..Self::default()
        }
    }

    /// Rejects submissions whose `tree_id` equals `tree_id`.
    pub fn reject_tree(&self, tree_id: impl Into<Value>) {
        self.rejected.lock().unwrap().push(tree_id.into());
    }

    pub fn fail_all(&self, fail: bool) {
        *self.fail_all.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<(EntityKind, StorageRecord)> {
        self.calls.lock().unwrap().clone()
    }

    /// `tree_id`s in submission order.
    pub fn submitted_trees(&self) -> Vec<Value> {
        self.calls()
            .iter()
            .map(|(_, r)| r.get("tree_id").cloned().unwrap_or(Value::Null))
            .collect()
    }
}

impl RemoteSubmit for MockRemote {
    fn submit<'a>(&'a self, entity: EntityKind, record: &'a StorageRecord) -> SubmitFuture<'a> {
        Box::pin(async move {
            let index = {
                let mut calls = self.calls.lock().unwrap();
                calls.push((entity, record.clone()));
                calls.len() - 1
            };
            if let Some(hook) = &self.on_submit {
                hook(index);
            }
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            if *self.fail_all.lock().unwrap() {
                return Err(SubmitError::Transport {
                    message: "connection reset".to_string(),
                });
            }
            let tree_id = record.get("tree_id").cloned().unwrap_or(Value::Null);
            if self.rejected.lock().unwrap().contains(&tree_id) {
                return Err(SubmitError::Rejected {
                    status: 500,
                    body: format!("tree {tree_id} rejected"),
                });
            }
            Ok(())
        })
    }
}

/// Storage whose writes always fail.
pub struct FailingStorage;

impl Storage for FailingStorage {
    fn read(&self, _key: &str) -> canopy_core::Result<Option<String>> {
        Ok(None)
    }

    fn write(&self, _key: &str, _contents: &str) -> canopy_core::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
    }
}

/// Builds a context over in-memory storage.
pub fn context(remote: Arc<MockRemote>, online: bool) -> (SyncContext, MemoryStorage) {
    let storage = MemoryStorage::new();
    let queue = OfflineQueue::open(Box::new(storage.clone()));
    let ctx = SyncContext::new(queue, Connectivity::new(online), remote);
    (ctx, storage)
}

/// A minimal valid metric capture.
pub fn metric(tree_id: i64) -> PresentationRecord {
    PresentationRecord::new()
        .with("tree_id", tree_id)
        .with("measurement_date", "2024-05-01")
        .with("height", "12.5")
        .with("health_score", 7)
}

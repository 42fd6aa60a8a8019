// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for draining the queue.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use super::test_helpers::{context, metric, MockRemote};
use super::*;
use crate::context::SyncContext;
use crate::error::Error;
use canopy_core::{EntityKind, PresentationRecord};
use serde_json::json;
use yare::parameterized;

fn seed(ctx: &SyncContext, trees: &[i64]) -> Vec<String> {
    let mut queue = ctx.queue();
    trees
        .iter()
        .map(|tree| queue.enqueue(EntityKind::Metric, metric(*tree)).unwrap().id)
        .collect()
}

fn queued_trees(ctx: &SyncContext) -> Vec<serde_json::Value> {
    ctx.queue()
        .list()
        .iter()
        .map(|r| r.payload.get("tree_id").cloned().unwrap())
        .collect()
}

#[parameterized(
    identity = { RemovalPolicy::Identity },
    front_truncate = { RemovalPolicy::FrontTruncate },
)]
fn test_all_success_empties_queue(policy: RemovalPolicy) {
    tokio::runtime::Runtime::new().unwrap().block_on(async {
        let remote = Arc::new(MockRemote::new());
        let (ctx, _) = context(Arc::clone(&remote), true);
        seed(&ctx, &[1, 2, 3]);

        let result = SyncOrchestrator::new(ctx.clone(), policy)
            .drain()
            .await
            .unwrap();

        assert_eq!(
            result,
            SyncResult {
                synced: 3,
                total: 3,
                errors: None,
            }
        );
        assert_eq!(ctx.pending(), 0);
        assert_eq!(remote.submitted_trees(), vec![json!(1), json!(2), json!(3)]);
    });
}

#[tokio::test]
async fn test_records_are_submitted_in_storage_shape() {
    let remote = Arc::new(MockRemote::new());
    let (ctx, _) = context(Arc::clone(&remote), true);
    let action = PresentationRecord::new()
        .with("tree_id", 9)
        .with("action_type", "pruning")
        .with("cost", "")
        .with("completed", true);
    ctx.queue().enqueue(EntityKind::Action, action).unwrap();

    SyncOrchestrator::new(ctx, RemovalPolicy::Identity)
        .drain()
        .await
        .unwrap();

    let calls = remote.calls();
    assert_eq!(calls.len(), 1);
    let (entity, record) = &calls[0];
    assert_eq!(*entity, EntityKind::Action);
    assert_eq!(record.get("follow_up_needed"), Some(&json!(false)));
    assert_eq!(record.get("cost"), Some(&json!(null)));
    assert!(!record.contains("completed"));
}

#[tokio::test]
async fn test_interleaved_failure_with_identity_removal() {
    let remote = Arc::new(MockRemote::new());
    remote.reject_tree(1);
    let (ctx, _) = context(Arc::clone(&remote), true);
    let ids = seed(&ctx, &[1, 2]);

    let result = SyncOrchestrator::new(ctx.clone(), RemovalPolicy::Identity)
        .drain()
        .await
        .unwrap();

    assert_eq!(result.synced, 1);
    assert_eq!(result.total, 2);
    let errors = result.errors.unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].record.id, ids[0]);
    assert!(matches!(
        errors[0].error,
        SubmitError::Rejected { status: 500, .. }
    ));

    // The failed record stays; the delivered one is gone.
    assert_eq!(queued_trees(&ctx), vec![json!(1)]);
    let queue = ctx.queue();
    let kept = &queue.list()[0];
    assert_eq!(kept.attempts, 1);
    assert!(kept.last_error.as_deref().unwrap().contains("HTTP 500"));
}

#[tokio::test]
async fn test_interleaved_failure_with_front_truncation() {
    let remote = Arc::new(MockRemote::new());
    remote.reject_tree(1);
    let (ctx, _) = context(Arc::clone(&remote), true);
    seed(&ctx, &[1, 2]);

    let result = SyncOrchestrator::new(ctx.clone(), RemovalPolicy::FrontTruncate)
        .drain()
        .await
        .unwrap();

    assert_eq!(result.synced, 1);
    assert_eq!(result.failed(), 1);
    // One record is dropped from the front: the failed one. The delivered
    // record stays and is submitted again on the next drain.
    assert_eq!(queued_trees(&ctx), vec![json!(2)]);
}

#[tokio::test]
async fn test_offline_drain_leaves_queue_untouched() {
    let remote = Arc::new(MockRemote::new());
    let (ctx, storage) = context(Arc::clone(&remote), false);
    seed(&ctx, &[1, 2]);
    let before = storage.get(QUEUE_KEY);

    let err = SyncOrchestrator::new(ctx.clone(), RemovalPolicy::Identity)
        .drain()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Offline));
    assert!(remote.calls().is_empty());
    assert_eq!(storage.get(QUEUE_KEY), before);
    assert_eq!(ctx.pending(), 2);
}

#[tokio::test]
async fn test_unmappable_record_aborts_before_any_submission() {
    let remote = Arc::new(MockRemote::new());
    let (ctx, _) = context(Arc::clone(&remote), true);
    seed(&ctx, &[1]);
    let bad = metric(2).with("height", "tall");
    ctx.queue().enqueue(EntityKind::Metric, bad).unwrap();

    let err = SyncOrchestrator::new(ctx.clone(), RemovalPolicy::Identity)
        .drain()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Mapping(_)));
    assert!(err.to_string().contains("height"));
    assert!(remote.calls().is_empty());
    assert_eq!(ctx.pending(), 2);
}

#[tokio::test]
async fn test_empty_queue_drains_to_zero() {
    let remote = Arc::new(MockRemote::new());
    let (ctx, _) = context(Arc::clone(&remote), true);

    let result = SyncOrchestrator::new(ctx, RemovalPolicy::Identity)
        .drain()
        .await
        .unwrap();

    assert_eq!(result.synced, 0);
    assert_eq!(result.total, 0);
    assert_eq!(result.errors, None);
}

#[tokio::test]
async fn test_capture_during_drain_is_kept() {
    let late: Arc<Mutex<Option<SyncContext>>> = Arc::new(Mutex::new(None));
    let hook_ctx = Arc::clone(&late);
    let remote = Arc::new(MockRemote::with_hook(move |index| {
        if index == 0 {
            if let Some(ctx) = hook_ctx.lock().unwrap().as_ref() {
                ctx.queue().enqueue(EntityKind::Metric, metric(99)).unwrap();
            }
        }
    }));
    let (ctx, _) = context(Arc::clone(&remote), true);
    *late.lock().unwrap() = Some(ctx.clone());
    seed(&ctx, &[1, 2]);

    let result = SyncOrchestrator::new(ctx.clone(), RemovalPolicy::Identity)
        .drain()
        .await
        .unwrap();

    assert_eq!(result.total, 2);
    assert_eq!(result.synced, 2);
    assert_eq!(queued_trees(&ctx), vec![json!(99)]);
    *late.lock().unwrap() = None;
}

#[tokio::test]
async fn test_failures_accumulate_across_drains() {
    let remote = Arc::new(MockRemote::new());
    remote.fail_all(true);
    let (ctx, _) = context(Arc::clone(&remote), true);
    seed(&ctx, &[1]);
    let orchestrator = SyncOrchestrator::new(ctx.clone(), RemovalPolicy::Identity);

    orchestrator.drain().await.unwrap();
    let result = orchestrator.drain().await.unwrap();
    assert_eq!(result.synced, 0);
    assert_eq!(ctx.queue().list()[0].attempts, 2);
    assert_eq!(
        ctx.queue().list()[0].last_error.as_deref(),
        Some("transport error: connection reset")
    );

    remote.fail_all(false);
    let result = orchestrator.drain().await.unwrap();
    assert_eq!(result.synced, 1);
    assert_eq!(ctx.pending(), 0);
}

#[test]
fn test_removal_policy_names() {
    let policy: RemovalPolicy = serde_json::from_value(json!("front-truncate")).unwrap();
    assert_eq!(policy, RemovalPolicy::FrontTruncate);
    assert_eq!(RemovalPolicy::default(), RemovalPolicy::Identity);
}

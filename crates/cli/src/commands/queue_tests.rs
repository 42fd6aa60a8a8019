// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use canopy_core::{EntityKind, PresentationRecord};
use chrono::{TimeZone, Utc};

fn pending(tree: impl Into<Value>) -> PendingRecord {
    PendingRecord::new(
        "metric-a1b2c3d4e5f6".to_string(),
        EntityKind::Metric,
        PresentationRecord::new().with("tree_id", tree),
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
    )
}

#[test]
fn test_format_fresh_record() {
    assert_eq!(
        format_queue_line(&pending(12)),
        "metric-a1b2c3d4e5f6  metric      tree 12  captured 2024-05-01 09:30"
    );
}

#[test]
fn test_format_text_tree_id_without_quotes() {
    assert!(format_queue_line(&pending("T-17")).contains("tree T-17  "));
}

#[test]
fn test_format_shows_failures() {
    let mut record = pending(3);
    record.record_failure("HTTP 500: down");
    record.record_failure("HTTP 503: busy");

    assert!(format_queue_line(&record).ends_with("(2 failed: HTTP 503: busy)"));
}

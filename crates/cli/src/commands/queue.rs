// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::Value;

use canopy_core::PendingRecord;

use crate::error::Result;
use crate::sync::OfflineQueue;

/// One line per pending record.
pub fn format_queue_line(record: &PendingRecord) -> String {
    let tree = match record.payload.get("tree_id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    };
    let mut line = format!(
        "{}  {:<10}  tree {}  captured {}",
        record.id,
        record.entity.as_str(),
        tree,
        record.captured_at.format("%Y-%m-%d %H:%M")
    );
    if record.attempts > 0 {
        line.push_str(&format!("  ({} failed", record.attempts));
        if let Some(err) = &record.last_error {
            line.push_str(&format!(": {}", err));
        }
        line.push(')');
    }
    line
}

/// List pending records.
pub fn run(queue: &OfflineQueue, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(queue.list())?);
        return Ok(());
    }

    if queue.is_empty() {
        println!("no pending records");
        return Ok(());
    }
    for record in queue.list() {
        println!("{}", format_queue_line(record));
    }
    println!(
        "{} pending record{}",
        queue.len(),
        if queue.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;

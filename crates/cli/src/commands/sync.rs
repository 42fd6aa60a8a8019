// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::config::Config;
use crate::context::SyncContext;
use crate::error::Result;
use crate::sync::{SyncOrchestrator, SyncResult};

/// Human-readable drain summary, one failure per line.
pub fn format_summary(result: &SyncResult) -> String {
    let mut out = format!("synced {} of {}", result.synced, result.total);
    if let Some(errors) = &result.errors {
        out.push_str(&format!(", {} failed", errors.len()));
        for failure in errors {
            out.push_str(&format!("\n  {}: {}", failure.record.id, failure.error));
        }
    }
    out
}

/// Drain the offline queue.
pub async fn run(ctx: &SyncContext, config: &Config, json: bool) -> Result<()> {
    let orchestrator = SyncOrchestrator::new(ctx.clone(), config.sync.removal);
    let result = orchestrator.drain().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", format_summary(&result));
    }
    Ok(())
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;

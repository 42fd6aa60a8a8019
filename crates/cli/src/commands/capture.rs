// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::Value;

use canopy_core::{EntityKind, PresentationRecord};

use crate::capture::{CaptureController, CaptureState};
use crate::config::Config;
use crate::context::SyncContext;
use crate::error::{Error, Result};

/// Interprets a raw field value: JSON when it parses, text otherwise.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Builds a presentation record from `key=value` pairs. Later pairs win.
pub fn build_record(fields: &[(String, String)]) -> PresentationRecord {
    fields
        .iter()
        .map(|(key, raw)| (key.clone(), parse_value(raw)))
        .collect()
}

/// Capture one record through the form controller.
pub async fn run(
    ctx: &SyncContext,
    config: &Config,
    entity: EntityKind,
    fields: &[(String, String)],
) -> Result<()> {
    let controller = CaptureController::new(ctx.clone(), entity, config.success_display());
    let state = controller.submit(build_record(fields)).await?;

    match state {
        CaptureState::Error(message) => Err(Error::CaptureFailed(message)),
        state => {
            println!("{}", state);
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;

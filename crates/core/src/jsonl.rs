// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSONL (JSON Lines) encoding.
//!
//! Persisted sequences are stored one JSON record per line, which keeps the
//! files diffable and lets a reader report exactly which line is damaged.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};

/// Encodes records as JSONL, one record per line with a trailing newline.
pub fn to_string<T: Serialize>(records: &[T]) -> Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

/// Decodes JSONL content, skipping blank lines.
///
/// A line that fails to parse is reported as [`Error::CorruptedData`] with
/// its 1-based line number.
pub fn from_str<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    let mut records = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: T = serde_json::from_str(line)
            .map_err(|e| Error::CorruptedData(format!("line {}: {}", index + 1, e)))?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
#[path = "jsonl_tests.rs"]
mod tests;

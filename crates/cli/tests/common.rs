// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Remote that refuses connections, so every probe reports offline.
pub const UNREACHABLE_REMOTE: &str = "http://127.0.0.1:9/api";

/// `canopy` isolated in `temp`: config and queue live there.
pub fn canopy(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("canopy");
    cmd.env("CANOPY_CONFIG", temp.path().join("config.toml"))
        .env("CANOPY_DATA_DIR", temp.path().join("data"))
        .env("CANOPY_REMOTE_URL", UNREACHABLE_REMOTE)
        .env_remove("RUST_LOG");
    cmd
}

/// Capture a metric offline and assert it was queued.
pub fn capture_offline(temp: &TempDir, tree_id: &str) {
    canopy(temp)
        .args(["capture", "metric", "--offline"])
        .args(["-f", &format!("tree_id={}", tree_id), "-f", "height=12.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved locally"));
}

/// Pending records as JSON.
pub fn queue_json(temp: &TempDir) -> serde_json::Value {
    let output = canopy(temp).args(["queue", "--json"]).output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

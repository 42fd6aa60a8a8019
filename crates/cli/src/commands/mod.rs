// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod capture;
pub mod config;
pub mod queue;
pub mod sync;

use std::path::PathBuf;
use std::sync::Arc;

use canopy_core::FileStorage;
use tracing::debug;

use crate::config::{default_config_path, Config};
use crate::context::SyncContext;
use crate::error::Result;
use crate::sync::{Connectivity, HttpRemote, OfflineQueue};

/// Loads the effective configuration: file, then environment overrides.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = Config::load(&path)?.with_env_overrides();
    Ok((config, path))
}

/// Opens the offline queue configured in `config`.
pub fn open_queue(config: &Config) -> Result<OfflineQueue> {
    let storage = FileStorage::open(&config.queue_dir())?;
    Ok(OfflineQueue::open(Box::new(storage)))
}

/// Builds the shared sync context.
///
/// Connectivity comes from `offline`, else from probing the remote.
pub async fn open_context(config: &Config, offline: bool) -> Result<SyncContext> {
    let queue = open_queue(config)?;
    if let Some(e) = queue.load_error() {
        eprintln!("warning: {}", e);
    }
    let remote = HttpRemote::new(&config.remote)?;
    let online = !offline && remote.probe().await;
    debug!(online, url = %config.remote.url, "connectivity determined");

    Ok(SyncContext::new(
        queue,
        Connectivity::new(online),
        Arc::new(remote),
    ))
}

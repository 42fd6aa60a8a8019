// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! canopy - Offline-first capture and sync of tree field measurements.
//!
//! This crate provides the sync layer and the `canopy` CLI on top of
//! `canopy-core`'s record mapping.
//!
//! # Main Components
//!
//! - [`CaptureController`] - Form state machine: submit online, else queue
//! - [`OfflineQueue`] - Durable FIFO of captured records
//! - [`SyncOrchestrator`] - Drains the queue into the remote store
//! - [`SyncContext`] - Queue, connectivity and remote shared by the above
//! - [`Config`] - User configuration (`config.toml`)
//!
//! ```rust,ignore
//! use canopy::{CaptureController, SyncOrchestrator};
//!
//! let form = CaptureController::new(ctx.clone(), EntityKind::Metric, config.success_display());
//! form.submit(record).await?;
//!
//! let result = SyncOrchestrator::new(ctx, config.sync.removal).drain().await?;
//! println!("synced {} of {}", result.synced, result.total);
//! ```

mod cli;
mod commands;
mod env;

pub mod capture;
pub mod config;
pub mod context;
pub mod error;
pub mod sync;

pub use capture::{CaptureController, CaptureState};
pub use cli::{Cli, Command};
pub use config::Config;
pub use context::SyncContext;
pub use error::{Error, Result};
pub use sync::{
    Connectivity, HttpRemote, OfflineQueue, RemoteSubmit, RemovalPolicy, SyncOrchestrator,
    SyncResult,
};

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let (config, config_path) = commands::load_config(cli.config)?;

    match cli.command {
        Command::Capture {
            entity,
            fields,
            offline,
        } => {
            let ctx = commands::open_context(&config, offline).await?;
            commands::capture::run(&ctx, &config, entity, &fields).await
        }
        Command::Queue { json } => {
            let queue = commands::open_queue(&config)?;
            commands::queue::run(&queue, json)
        }
        Command::Sync { offline, json } => {
            let ctx = commands::open_context(&config, offline).await?;
            commands::sync::run(&ctx, &config, json).await
        }
        Command::Config => commands::config::run(&config, &config_path),
    }
}

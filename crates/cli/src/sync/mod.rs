// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-first delivery of captured records.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  encode   ┌─────────────┐  submit  ┌─────────────┐
//! │   Capture   │──────────►│ RemoteSubmit│─────────►│   Remote    │
//! │ (controller)│           │   (trait)   │          │    Store    │
//! └─────────────┘           └─────────────┘          └─────────────┘
//!        │ offline / failure        ▲
//!        ▼                          │ drain (FIFO)
//! ┌─────────────┐           ┌───────┴─────┐
//! │    Queue    │──────────►│ Orchestrator│
//! │  (JSONL)    │           │   (drain)   │
//! └─────────────┘           └─────────────┘
//! ```
//!
//! - Queue persisted as JSONL through a [`canopy_core::Storage`]
//! - Connectivity cell with change listeners
//! - Removal after drain by record identity, or legacy front truncation
//! - Injectable remote for testing

mod connectivity;
mod orchestrator;
mod queue;
mod remote;

pub use connectivity::{Connectivity, ListenerId};
pub use orchestrator::{RecordFailure, RemovalPolicy, SyncOrchestrator, SyncResult};
pub use queue::{OfflineQueue, QUEUE_KEY};
pub use remote::{HttpRemote, RemoteSubmit, SubmitError, SubmitFuture};

#[cfg(test)]
pub(crate) mod test_helpers;

#[cfg(test)]
mod connectivity_tests;

#[cfg(test)]
mod orchestrator_tests;

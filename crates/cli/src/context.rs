// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared collaborators of the capture and sync paths.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::sync::{Connectivity, OfflineQueue, RemoteSubmit};

/// The queue, connectivity cell and remote, built once and shared.
///
/// Clones are cheap and refer to the same queue. The queue guard returned
/// by [`SyncContext::queue`] must not be held across an `.await`.
#[derive(Clone)]
pub struct SyncContext {
    queue: Arc<Mutex<OfflineQueue>>,
    connectivity: Connectivity,
    remote: Arc<dyn RemoteSubmit>,
}

impl SyncContext {
    pub fn new(
        queue: OfflineQueue,
        connectivity: Connectivity,
        remote: Arc<dyn RemoteSubmit>,
    ) -> Self {
        SyncContext {
            queue: Arc::new(Mutex::new(queue)),
            connectivity,
            remote,
        }
    }

    /// Locks the queue for one load-modify-persist step.
    pub fn queue(&self) -> MutexGuard<'_, OfflineQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    pub fn remote(&self) -> &dyn RemoteSubmit {
        self.remote.as_ref()
    }

    /// Number of records waiting for delivery.
    pub fn pending(&self) -> usize {
        self.queue().len()
    }
}

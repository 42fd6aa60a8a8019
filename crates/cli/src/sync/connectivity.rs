// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity state cell.
//!
//! Holds the last known online/offline state and notifies subscribers on
//! transitions. Clones share the same state and listeners.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

/// Handle returned by [`Connectivity::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(bool) + Send + Sync>;

struct State {
    online: bool,
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

/// Shared, subscribable online/offline flag.
#[derive(Clone)]
pub struct Connectivity {
    state: Arc<Mutex<State>>,
}

impl Connectivity {
    pub fn new(online: bool) -> Self {
        Connectivity {
            state: Arc::new(Mutex::new(State {
                online,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn is_online(&self) -> bool {
        self.lock().online
    }

    /// Updates the state. Listeners run only when the value changed, and
    /// run after the internal lock is released.
    ///
    /// Returns true if this call changed the state.
    pub fn set_online(&self, online: bool) -> bool {
        let listeners: Vec<Listener> = {
            let mut state = self.lock();
            if state.online == online {
                return false;
            }
            state.online = online;
            state.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        debug!(online, "connectivity changed");
        for listener in listeners {
            listener(online);
        }
        true
    }

    /// Subscribes to transitions.
    pub fn on_change<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let mut state = self.lock();
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        state.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Unsubscribes. Returns false if `id` was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut state = self.lock();
        let before = state.listeners.len();
        state.listeners.retain(|(lid, _)| *lid != id);
        state.listeners.len() != before
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Connectivity {
    fn default() -> Self {
        Connectivity::new(true)
    }
}

impl std::fmt::Debug for Connectivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Connectivity")
            .field("online", &state.online)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

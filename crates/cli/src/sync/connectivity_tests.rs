// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::sync::{Arc, Mutex};

fn recorder(conn: &Connectivity) -> (ListenerId, Arc<Mutex<Vec<bool>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let id = conn.on_change(move |online| sink.lock().unwrap().push(online));
    (id, seen)
}

#[test]
fn test_initial_state() {
    assert!(Connectivity::new(true).is_online());
    assert!(!Connectivity::new(false).is_online());
    assert!(Connectivity::default().is_online());
}

#[test]
fn test_listeners_fire_only_on_transitions() {
    let conn = Connectivity::new(true);
    let (_, seen) = recorder(&conn);

    assert!(!conn.set_online(true));
    assert!(conn.set_online(false));
    assert!(!conn.set_online(false));
    assert!(conn.set_online(true));

    assert_eq!(*seen.lock().unwrap(), vec![false, true]);
}

#[test]
fn test_removed_listener_is_not_called() {
    let conn = Connectivity::new(true);
    let (id, seen) = recorder(&conn);

    assert!(conn.remove_listener(id));
    assert!(!conn.remove_listener(id));
    conn.set_online(false);

    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_clones_share_state_and_listeners() {
    let conn = Connectivity::new(false);
    let view = conn.clone();
    let (_, seen) = recorder(&view);

    conn.set_online(true);
    assert!(view.is_online());
    assert_eq!(*seen.lock().unwrap(), vec![true]);
}

#[test]
fn test_listener_may_read_state() {
    let conn = Connectivity::new(true);
    let inner = conn.clone();
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    conn.on_change(move |_| *sink.lock().unwrap() = Some(inner.is_online()));

    conn.set_online(false);
    assert_eq!(*seen.lock().unwrap(), Some(false));
}

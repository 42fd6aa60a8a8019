// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture form controller.
//!
//! Drives one form through `Idle → Submitting → {Success, LocalSaved, Error}`.
//! Online captures go straight to the remote; offline captures, and online
//! captures the remote refused, are saved to the offline queue instead.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, warn};

use canopy_core::{encode, validate, EntityKind, PresentationRecord};

use crate::context::SyncContext;
use crate::error::{Error, Result};

/// What the form shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Submitting,
    /// Delivered to the remote. Reads back as `Idle` after the display time.
    Success,
    /// Saved to the offline queue.
    LocalSaved,
    /// Human-readable failure.
    Error(String),
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureState::Idle => write!(f, "idle"),
            CaptureState::Submitting => write!(f, "submitting"),
            CaptureState::Success => write!(f, "saved"),
            CaptureState::LocalSaved => write!(f, "saved locally"),
            CaptureState::Error(message) => write!(f, "{}", message),
        }
    }
}

struct Phase {
    state: CaptureState,
    success_at: Option<Instant>,
}

impl Phase {
    fn set(&mut self, state: CaptureState) {
        self.success_at = (state == CaptureState::Success).then(Instant::now);
        self.state = state;
    }

    fn expire(&mut self, display: Duration) {
        if let Some(at) = self.success_at {
            if at.elapsed() >= display {
                self.set(CaptureState::Idle);
            }
        }
    }
}

/// Resets an abandoned submission back to idle.
struct InFlight<'a> {
    phase: &'a Mutex<Phase>,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
            if phase.state == CaptureState::Submitting {
                phase.set(CaptureState::Idle);
            }
        }
    }
}

/// Controller for capturing one entity kind.
pub struct CaptureController {
    ctx: SyncContext,
    entity: EntityKind,
    success_display: Duration,
    phase: Mutex<Phase>,
}

impl CaptureController {
    pub fn new(ctx: SyncContext, entity: EntityKind, success_display: Duration) -> Self {
        CaptureController {
            ctx,
            entity,
            success_display,
            phase: Mutex::new(Phase {
                state: CaptureState::Idle,
                success_at: None,
            }),
        }
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    /// Current state, with an expired `Success` already turned into `Idle`.
    pub fn state(&self) -> CaptureState {
        let mut phase = self.lock();
        phase.expire(self.success_display);
        phase.state.clone()
    }

    /// Dismisses a finished submission's outcome.
    pub fn acknowledge(&self) {
        let mut phase = self.lock();
        if phase.state != CaptureState::Submitting {
            phase.set(CaptureState::Idle);
        }
    }

    /// Submits one capture and returns the state it ended in.
    ///
    /// Returns [`Error::SubmissionInFlight`] if another submission is
    /// running, and [`Error::Mapping`] if the record cannot be converted;
    /// the latter also leaves the form in `Error`. A failed local save is
    /// not an `Err`: it is reported through the `Error` state.
    pub async fn submit(&self, record: PresentationRecord) -> Result<CaptureState> {
        {
            let mut phase = self.lock();
            if phase.state == CaptureState::Submitting {
                return Err(Error::SubmissionInFlight);
            }
            phase.set(CaptureState::Submitting);
        }
        let mut in_flight = InFlight {
            phase: &self.phase,
            settled: false,
        };

        let outcome = self.deliver(record).await;
        let state = match &outcome {
            Ok(state) => state.clone(),
            Err(e) => CaptureState::Error(e.to_string()),
        };
        self.lock().set(state);
        in_flight.settled = true;
        outcome
    }

    async fn deliver(&self, record: PresentationRecord) -> Result<CaptureState> {
        let mapping = self.entity.mapping();
        validate(&record, mapping)?;
        let storage = encode(&record, mapping)?;

        if self.ctx.connectivity().is_online() {
            match self.ctx.remote().submit(self.entity, &storage).await {
                Ok(()) => {
                    info!(entity = %self.entity, "capture delivered");
                    return Ok(CaptureState::Success);
                }
                Err(e) => {
                    warn!(entity = %self.entity, error = %e, "remote refused capture, saving locally")
                }
            }
        }

        let queued = self.ctx.queue().enqueue(self.entity, record);
        match queued {
            Ok(pending) => {
                info!(id = %pending.id, "capture saved locally");
                Ok(CaptureState::LocalSaved)
            }
            Err(e) => {
                warn!(entity = %self.entity, error = %e, "capture could not be saved");
                Ok(CaptureState::Error(format!(
                    "could not save the record locally: {}",
                    e
                )))
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Phase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;

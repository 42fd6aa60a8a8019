// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the canopy library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("device is offline\n  hint: captured records stay queued until a sync succeeds")]
    Offline,

    #[error("queued data is unreadable: {0}")]
    Serialization(String),

    #[error("remote submission failed: {0}")]
    RemoteSubmit(String),

    #[error("{0}")]
    Mapping(canopy_core::Error),

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("{0}")]
    CaptureFailed(String),

    #[error("invalid entity type: '{0}'\n  hint: valid types are: metric, inspection, action")]
    InvalidEntity(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for canopy operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<canopy_core::Error> for Error {
    fn from(e: canopy_core::Error) -> Self {
        match e {
            canopy_core::Error::Io(e) => Error::Io(e),
            canopy_core::Error::Json(e) => Error::Json(e),
            canopy_core::Error::CorruptedData(s) => Error::Serialization(s),
            canopy_core::Error::InvalidEntity(s) => Error::InvalidEntity(s),
            e @ (canopy_core::Error::Mapping { .. } | canopy_core::Error::MissingField { .. }) => {
                Error::Mapping(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

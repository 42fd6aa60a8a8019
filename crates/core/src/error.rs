// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for canopy-core operations.

use thiserror::Error;

use crate::record::EntityKind;

/// All possible errors that can occur in canopy-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot map {entity}.{field}: expected {expected}, found {found}")]
    Mapping {
        entity: EntityKind,
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("{entity}.{field} is required")]
    MissingField {
        entity: EntityKind,
        field: &'static str,
    },

    #[error("invalid entity type: '{0}'\n  hint: valid types are: metric, inspection, action")]
    InvalidEntity(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for errors raised by the mapping engine.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Error::Mapping { .. } | Error::MissingField { .. })
    }
}

/// A specialized Result type for canopy-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

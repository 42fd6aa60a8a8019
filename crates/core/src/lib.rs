// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! canopy-core: Shared library for canopy field capture
//!
//! This crate provides the record shapes, the bidirectional field mapping
//! engine, pending-record bookkeeping and the durable storage primitives
//! used by the canopy sync layer.

pub mod error;
pub mod jsonl;
pub mod mapping;
pub mod pending;
pub mod record;
pub mod storage;

pub use error::{Error, Result};
pub use mapping::{decode, encode, validate, EntityMapping, FieldDescriptor, FieldKind, Rating};
pub use pending::PendingRecord;
pub use record::{EntityKind, PresentationRecord, StorageRecord};
pub use storage::{FileStorage, MemoryStorage, Storage};

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Record shapes exchanged at the capture and persistence boundaries.
//!
//! A [`PresentationRecord`] is what a capture form produces: form field
//! names, measurements as entered text, categories as labels. A
//! [`StorageRecord`] is what the remote store persists: storage column
//! names, numbers as numbers, ratings as integers. Both are flat maps of
//! field name to JSON value; the mapping engine converts between them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The kinds of field measurement that can be captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Growth and health measurements of a tree.
    Metric,
    /// Condition assessment by an inspector.
    Inspection,
    /// Care work performed on a tree.
    Action,
}

impl EntityKind {
    /// All entity kinds, in declaration order.
    pub const ALL: [EntityKind; 3] = [EntityKind::Metric, EntityKind::Inspection, EntityKind::Action];

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Metric => "metric",
            EntityKind::Inspection => "inspection",
            EntityKind::Action => "action",
        }
    }

    /// Returns the remote collection name records of this kind are posted to.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Metric => "metrics",
            EntityKind::Inspection => "inspections",
            EntityKind::Action => "actions",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "metric" | "metrics" => Ok(EntityKind::Metric),
            "inspection" | "inspections" => Ok(EntityKind::Inspection),
            "action" | "actions" => Ok(EntityKind::Action),
            _ => Err(Error::InvalidEntity(s.to_string())),
        }
    }
}

macro_rules! record_shape {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Map<String, Value>);

        impl $name {
            /// Creates an empty record.
            pub fn new() -> Self {
                Self(Map::new())
            }

            /// Builder-style insert.
            pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
                self.0.insert(field.into(), value.into());
                self
            }

            /// Returns the value of a field, if present.
            pub fn get(&self, field: &str) -> Option<&Value> {
                self.0.get(field)
            }

            /// Sets a field, returning the previous value.
            pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
                self.0.insert(field.into(), value.into())
            }

            /// Removes a field, returning its value.
            pub fn remove(&mut self, field: &str) -> Option<Value> {
                self.0.remove(field)
            }

            pub fn contains(&self, field: &str) -> bool {
                self.0.contains_key(field)
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Iterates over fields in key order.
            pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
                self.0.iter()
            }

            pub fn as_map(&self) -> &Map<String, Value> {
                &self.0
            }

            pub fn into_map(self) -> Map<String, Value> {
                self.0
            }
        }

        impl From<Map<String, Value>> for $name {
            fn from(map: Map<String, Value>) -> Self {
                Self(map)
            }
        }

        impl FromIterator<(String, Value)> for $name {
            fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }
    };
}

record_shape!(
    /// A record in the shape used at the capture boundary.
    PresentationRecord
);

record_shape!(
    /// A record in the shape used at the persistence boundary.
    StorageRecord
);

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;

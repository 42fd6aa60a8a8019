// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bidirectional field mapping between presentation and storage records.
//!
//! Each entity kind is described by an [`EntityMapping`]: a static table of
//! [`FieldDescriptor`]s, each tagged with how the field crosses the boundary.
//!
//! | Kind          | Encode (presentation → storage)   | Decode (storage → presentation) |
//! |---------------|-----------------------------------|---------------------------------|
//! | `Passthrough` | same name, optional conversion    | same name, optional conversion  |
//! | `Renamed`     | written under the storage name    | written under the form name     |
//! | `Derived`     | dropped                           | computed from a storage field   |
//! | `StorageOnly` | omitted                           | stored value or declared default|
//!
//! [`encode`] and [`decode`] are pure. `decode(encode(r))` reproduces every
//! passthrough and renamed field of `r` except quantized ratings, which come
//! back as their bucket's representative value.

pub mod conversion;
mod entities;
mod rating;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::record::{EntityKind, PresentationRecord, StorageRecord};

pub use conversion::{Convert, Mismatch, TypeConversion, ACTION_TYPES};
pub use entities::{ACTION, INSPECTION, METRIC};
pub use rating::Rating;

/// Value a storage-only field takes when the storage record lacks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Null,
    False,
    EmptyText,
}

impl Fallback {
    pub fn to_value(self) -> Value {
        match self {
            Fallback::Null => Value::Null,
            Fallback::False => Value::Bool(false),
            Fallback::EmptyText => Value::String(String::new()),
        }
    }
}

/// How a field crosses the presentation/storage boundary.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Same name in both shapes.
    Passthrough { conversion: Option<TypeConversion> },
    /// Different name in storage, converted both ways.
    Renamed {
        storage: &'static str,
        conversion: TypeConversion,
    },
    /// Presentation-only, computed from the storage field `source`.
    Derived {
        source: &'static str,
        compute: Convert,
    },
    /// Storage-only; surfaced on decode, never written on encode.
    StorageOnly {
        fallback: Fallback,
        conversion: Option<TypeConversion>,
    },
}

/// One field of an entity mapping.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Field name in the presentation shape (storage name for storage-only fields).
    pub name: &'static str,
    pub kind: FieldKind,
    /// Captures without this field are rejected by [`validate`].
    pub required: bool,
}

impl FieldDescriptor {
    pub const fn passthrough(name: &'static str) -> Self {
        FieldDescriptor {
            name,
            kind: FieldKind::Passthrough { conversion: None },
            required: false,
        }
    }

    pub const fn converted(name: &'static str, conversion: TypeConversion) -> Self {
        FieldDescriptor {
            name,
            kind: FieldKind::Passthrough {
                conversion: Some(conversion),
            },
            required: false,
        }
    }

    pub const fn renamed(
        name: &'static str,
        storage: &'static str,
        conversion: TypeConversion,
    ) -> Self {
        FieldDescriptor {
            name,
            kind: FieldKind::Renamed {
                storage,
                conversion,
            },
            required: false,
        }
    }

    pub const fn derived(name: &'static str, source: &'static str, compute: Convert) -> Self {
        FieldDescriptor {
            name,
            kind: FieldKind::Derived { source, compute },
            required: false,
        }
    }

    pub const fn storage_only(name: &'static str, fallback: Fallback) -> Self {
        FieldDescriptor {
            name,
            kind: FieldKind::StorageOnly {
                fallback,
                conversion: None,
            },
            required: false,
        }
    }

    pub const fn storage_only_converted(
        name: &'static str,
        fallback: Fallback,
        conversion: TypeConversion,
    ) -> Self {
        FieldDescriptor {
            name,
            kind: FieldKind::StorageOnly {
                fallback,
                conversion: Some(conversion),
            },
            required: false,
        }
    }

    pub const fn required(self) -> Self {
        FieldDescriptor {
            required: true,
            ..self
        }
    }

    /// Name of the field in the presentation shape, if it has one there.
    pub fn presentation_name(&self) -> Option<&'static str> {
        match self.kind {
            FieldKind::StorageOnly { .. } => None,
            _ => Some(self.name),
        }
    }

    /// Name of the field in the storage shape, if it has one there.
    pub fn storage_name(&self) -> Option<&'static str> {
        match self.kind {
            FieldKind::Passthrough { .. } | FieldKind::StorageOnly { .. } => Some(self.name),
            FieldKind::Renamed { storage, .. } => Some(storage),
            FieldKind::Derived { .. } => None,
        }
    }
}

/// Declarative description of one entity kind's two shapes.
#[derive(Debug)]
pub struct EntityMapping {
    pub entity: EntityKind,
    pub fields: &'static [FieldDescriptor],
}

impl EntityMapping {
    /// Looks up a descriptor by its presentation name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.presentation_name() == Some(name))
    }

    /// Field names of the presentation shape, in table order.
    pub fn presentation_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter_map(FieldDescriptor::presentation_name)
    }

    /// Field names of the storage shape, in table order.
    pub fn storage_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter_map(FieldDescriptor::storage_name)
    }

    fn mismatch(&self, field: &'static str, m: Mismatch) -> Error {
        Error::Mapping {
            entity: self.entity,
            field,
            expected: m.expected,
            found: m.found,
        }
    }
}

impl EntityKind {
    /// Returns the field mapping for this entity kind.
    pub fn mapping(&self) -> &'static EntityMapping {
        match self {
            EntityKind::Metric => &METRIC,
            EntityKind::Inspection => &INSPECTION,
            EntityKind::Action => &ACTION,
        }
    }
}

fn apply(
    mapping: &EntityMapping,
    field: &'static str,
    convert: Option<Convert>,
    value: Option<&Value>,
) -> Result<Option<Value>> {
    match convert {
        Some(convert) => convert(value).map_err(|m| mapping.mismatch(field, m)),
        None => Ok(value.cloned()),
    }
}

/// Converts a presentation record into the storage shape.
///
/// Fields the mapping does not declare are dropped.
pub fn encode(record: &PresentationRecord, mapping: &EntityMapping) -> Result<StorageRecord> {
    let mut out = StorageRecord::new();

    for field in mapping.fields {
        match field.kind {
            FieldKind::Passthrough { conversion } => {
                let value = apply(
                    mapping,
                    field.name,
                    conversion.map(|c| c.to_storage),
                    record.get(field.name),
                )?;
                if let Some(value) = value {
                    out.insert(field.name, value);
                }
            }
            FieldKind::Renamed {
                storage,
                conversion,
            } => {
                let value = apply(
                    mapping,
                    field.name,
                    Some(conversion.to_storage),
                    record.get(field.name),
                )?;
                if let Some(value) = value {
                    out.insert(storage, value);
                }
            }
            FieldKind::Derived { .. } | FieldKind::StorageOnly { .. } => {}
        }
    }

    Ok(out)
}

/// Converts a storage record into the presentation shape.
pub fn decode(record: &StorageRecord, mapping: &EntityMapping) -> Result<PresentationRecord> {
    let mut out = PresentationRecord::new();

    for field in mapping.fields {
        let value = match field.kind {
            FieldKind::Passthrough { conversion } => apply(
                mapping,
                field.name,
                conversion.map(|c| c.from_storage),
                record.get(field.name),
            )?,
            FieldKind::Renamed {
                storage,
                conversion,
            } => apply(
                mapping,
                field.name,
                Some(conversion.from_storage),
                record.get(storage),
            )?,
            FieldKind::Derived { source, compute } => {
                apply(mapping, field.name, Some(compute), record.get(source))?
            }
            FieldKind::StorageOnly {
                fallback,
                conversion,
            } => match record.get(field.name) {
                None | Some(Value::Null) => Some(fallback.to_value()),
                Some(stored) => apply(
                    mapping,
                    field.name,
                    conversion.map(|c| c.from_storage),
                    Some(stored),
                )?,
            },
        };
        if let Some(value) = value {
            out.insert(field.name, value);
        }
    }

    Ok(out)
}

/// Checks that every required field of a capture carries a value.
pub fn validate(record: &PresentationRecord, mapping: &EntityMapping) -> Result<()> {
    for field in mapping.fields.iter().filter(|f| f.required) {
        let present = match record.get(field.name) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        };
        if !present {
            return Err(Error::MissingField {
                entity: mapping.entity,
                field: field.name,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

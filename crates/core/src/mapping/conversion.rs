// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-field value conversions between presentation and storage shapes.
//!
//! Every conversion is a total function over `Option<&Value>`: `None` means
//! the field is absent from the source record, `Ok(None)` means the field is
//! omitted from the target record. A value of the wrong shape is a
//! [`Mismatch`], never a silent coercion.

use serde_json::{Number, Value};

use super::rating::Rating;

/// A value that does not have the shape a conversion expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub expected: &'static str,
    pub found: String,
}

impl Mismatch {
    fn new(expected: &'static str, found: &Value) -> Self {
        Mismatch {
            expected,
            found: found.to_string(),
        }
    }
}

/// Signature shared by all directional conversions.
pub type Convert = fn(Option<&Value>) -> Result<Option<Value>, Mismatch>;

/// A pair of conversions, one per direction.
#[derive(Debug, Clone, Copy)]
pub struct TypeConversion {
    pub to_storage: Convert,
    pub from_storage: Convert,
}

/// Health score assumed when the store holds none.
pub const DEFAULT_HEALTH_SCORE: i64 = 5;

/// Action types accepted by the remote store.
pub const ACTION_TYPES: [&str; 8] = [
    "pruning",
    "fertilization",
    "pest_control",
    "disease_treatment",
    "support_installation",
    "removal",
    "planting",
    "other",
];

const EXPECT_MEASUREMENT: &str = "a number or an empty value";
const EXPECT_SCORE: &str = "an integer rating between 0 and 10";
const EXPECT_LABEL: &str = "one of excellent, good, fair, poor, critical";
const EXPECT_BOOL: &str = "a boolean";
const EXPECT_ACTION_TYPE: &str = "a known action type";

/// Optional physical measurement: entered as text or number, stored as a
/// number, with `null` marking "not measured".
pub const MEASUREMENT: TypeConversion = TypeConversion {
    to_storage: measurement_to_storage,
    from_storage: measurement_from_storage,
};

/// Integer health score, 0–10.
pub const HEALTH_SCORE: TypeConversion = TypeConversion {
    to_storage: score_to_storage,
    from_storage: score_from_storage,
};

/// Rating label at the capture boundary, quantized integer in storage.
pub const CONDITION_RATING: TypeConversion = TypeConversion {
    to_storage: label_to_score,
    from_storage: score_to_label,
};

/// Strict boolean in both shapes.
pub const FLAG: TypeConversion = TypeConversion {
    to_storage: flag,
    from_storage: flag,
};

/// Boolean whose meaning flips between the shapes.
pub const INVERTED_FLAG: TypeConversion = TypeConversion {
    to_storage: inverted_flag,
    from_storage: inverted_flag,
};

/// Action type, validated against [`ACTION_TYPES`].
pub const ACTION_TYPE: TypeConversion = TypeConversion {
    to_storage: action_type,
    from_storage: action_type,
};

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(int.into());
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn measurement_to_storage(value: Option<&Value>) -> Result<Option<Value>, Mismatch> {
    match value {
        None | Some(Value::Null) => Ok(Some(Value::Null)),
        Some(Value::String(s)) if is_blank(s) => Ok(Some(Value::Null)),
        Some(Value::Number(n)) => Ok(Some(Value::Number(n.clone()))),
        Some(v @ Value::String(s)) => parse_number(s.trim())
            .map(|n| Some(Value::Number(n)))
            .ok_or_else(|| Mismatch::new(EXPECT_MEASUREMENT, v)),
        Some(other) => Err(Mismatch::new(EXPECT_MEASUREMENT, other)),
    }
}

fn measurement_from_storage(value: Option<&Value>) -> Result<Option<Value>, Mismatch> {
    match value {
        None | Some(Value::Null) => Ok(Some(Value::String(String::new()))),
        Some(Value::Number(n)) => Ok(Some(Value::String(n.to_string()))),
        // Decimal columns can arrive as text.
        Some(Value::String(s)) if is_blank(s) => Ok(Some(Value::String(String::new()))),
        Some(v @ Value::String(s)) => match parse_number(s.trim()) {
            Some(_) => Ok(Some(Value::String(s.trim().to_string()))),
            None => Err(Mismatch::new(EXPECT_MEASUREMENT, v)),
        },
        Some(other) => Err(Mismatch::new(EXPECT_MEASUREMENT, other)),
    }
}

/// Reads a 0–10 integer score from a number or numeric text.
pub fn score(value: &Value) -> Option<i64> {
    let raw = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    raw.filter(|s| (0..=10).contains(s))
}

fn score_to_storage(value: Option<&Value>) -> Result<Option<Value>, Mismatch> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if is_blank(s) => Ok(None),
        Some(v) => score(v)
            .map(|s| Some(Value::from(s)))
            .ok_or_else(|| Mismatch::new(EXPECT_SCORE, v)),
    }
}

fn score_from_storage(value: Option<&Value>) -> Result<Option<Value>, Mismatch> {
    match value {
        None | Some(Value::Null) => Ok(Some(Value::from(DEFAULT_HEALTH_SCORE))),
        Some(v) => score(v)
            .map(|s| Some(Value::from(s)))
            .ok_or_else(|| Mismatch::new(EXPECT_SCORE, v)),
    }
}

/// Stored score as-is, validated. Used for display-only copies of a rating.
pub fn raw_score(value: Option<&Value>) -> Result<Option<Value>, Mismatch> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => score(v)
            .map(|s| Some(Value::from(s)))
            .ok_or_else(|| Mismatch::new(EXPECT_SCORE, v)),
    }
}

fn label_to_score(value: Option<&Value>) -> Result<Option<Value>, Mismatch> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v @ Value::String(s)) => Rating::from_label(s)
            .map(|r| Some(Value::from(r.representative())))
            .ok_or_else(|| Mismatch::new(EXPECT_LABEL, v)),
        Some(other) => Err(Mismatch::new(EXPECT_LABEL, other)),
    }
}

/// Stored score to its category label.
pub fn score_to_label(value: Option<&Value>) -> Result<Option<Value>, Mismatch> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => score(v)
            .map(|s| Some(Value::from(Rating::from_score(s).as_str())))
            .ok_or_else(|| Mismatch::new(EXPECT_SCORE, v)),
    }
}

fn flag(value: Option<&Value>) -> Result<Option<Value>, Mismatch> {
    match value {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(Value::Bool(*b))),
        Some(other) => Err(Mismatch::new(EXPECT_BOOL, other)),
    }
}

fn inverted_flag(value: Option<&Value>) -> Result<Option<Value>, Mismatch> {
    match value {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(Value::Bool(!b))),
        Some(other) => Err(Mismatch::new(EXPECT_BOOL, other)),
    }
}

fn action_type(value: Option<&Value>) -> Result<Option<Value>, Mismatch> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if ACTION_TYPES.contains(&s.as_str()) => {
            Ok(Some(Value::String(s.clone())))
        }
        Some(other) => Err(Mismatch::new(EXPECT_ACTION_TYPE, other)),
    }
}

#[cfg(test)]
#[path = "conversion_tests.rs"]
mod tests;

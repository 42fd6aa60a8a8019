// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Five-bucket quantization of 0–10 condition and health ratings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse category of a 0–10 rating.
///
/// Bucketing uses inclusive lower thresholds (9, 7, 5, 3). Going back from a
/// category always yields the bucket's representative score, so a score of 9
/// becomes [`Rating::Excellent`] and comes back as 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl Rating {
    /// All categories, best first.
    pub const ALL: [Rating; 5] = [
        Rating::Excellent,
        Rating::Good,
        Rating::Fair,
        Rating::Poor,
        Rating::Critical,
    ];

    /// Buckets a raw score.
    pub fn from_score(score: i64) -> Rating {
        match score {
            s if s >= 9 => Rating::Excellent,
            s if s >= 7 => Rating::Good,
            s if s >= 5 => Rating::Fair,
            s if s >= 3 => Rating::Poor,
            _ => Rating::Critical,
        }
    }

    /// The score stored for this category.
    pub fn representative(&self) -> i64 {
        match self {
            Rating::Excellent => 10,
            Rating::Good => 8,
            Rating::Fair => 6,
            Rating::Poor => 4,
            Rating::Critical => 2,
        }
    }

    /// Returns the label used at the capture boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "excellent",
            Rating::Good => "good",
            Rating::Fair => "fair",
            Rating::Poor => "poor",
            Rating::Critical => "critical",
        }
    }

    /// Parses a label, case-insensitively.
    pub fn from_label(label: &str) -> Option<Rating> {
        let label = label.trim().to_lowercase();
        Rating::ALL.into_iter().find(|r| r.as_str() == label)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[path = "rating_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Field tables for the capturable entity kinds.

use super::conversion::{
    raw_score, score_to_label, ACTION_TYPE, CONDITION_RATING, FLAG, HEALTH_SCORE, INVERTED_FLAG,
    MEASUREMENT,
};
use super::{EntityMapping, Fallback, FieldDescriptor};
use crate::record::EntityKind;

/// Tree growth and health measurements (`tree_metrics`).
pub static METRIC: EntityMapping = EntityMapping {
    entity: EntityKind::Metric,
    fields: &[
        FieldDescriptor::passthrough("tree_id").required(),
        FieldDescriptor::passthrough("measurement_date"),
        FieldDescriptor::converted("height", MEASUREMENT),
        FieldDescriptor::converted("trunk_diameter", MEASUREMENT),
        FieldDescriptor::converted("crown_diameter", MEASUREMENT),
        FieldDescriptor::converted("crown_height", MEASUREMENT),
        FieldDescriptor::converted("health_score", HEALTH_SCORE),
        FieldDescriptor::converted("leaf_density", MEASUREMENT),
        // Captured with the measurement; the store files it on the tree.
        FieldDescriptor::passthrough("notes"),
        FieldDescriptor::derived("health_category", "health_score", score_to_label),
        FieldDescriptor::storage_only("created_at", Fallback::Null),
        FieldDescriptor::storage_only("updated_at", Fallback::Null),
    ],
};

/// Condition assessments (`tree_inspections`).
pub static INSPECTION: EntityMapping = EntityMapping {
    entity: EntityKind::Inspection,
    fields: &[
        FieldDescriptor::passthrough("tree_id").required(),
        FieldDescriptor::passthrough("inspection_date"),
        FieldDescriptor::passthrough("inspector_name"),
        FieldDescriptor::passthrough("notes"),
        FieldDescriptor::passthrough("next_inspection_date"),
        FieldDescriptor::converted("condition_rating", CONDITION_RATING),
        FieldDescriptor::derived("condition_rating_value", "condition_rating", raw_score),
        FieldDescriptor::storage_only_converted("pest_presence", Fallback::False, FLAG),
        FieldDescriptor::storage_only_converted("disease_presence", Fallback::False, FLAG),
        FieldDescriptor::storage_only_converted("structural_damage", Fallback::False, FLAG),
        FieldDescriptor::storage_only("created_at", Fallback::Null),
        FieldDescriptor::storage_only("updated_at", Fallback::Null),
    ],
};

/// Care work performed on a tree (`tree_actions`).
pub static ACTION: EntityMapping = EntityMapping {
    entity: EntityKind::Action,
    fields: &[
        FieldDescriptor::passthrough("tree_id").required(),
        FieldDescriptor::passthrough("action_date"),
        FieldDescriptor::converted("action_type", ACTION_TYPE),
        FieldDescriptor::passthrough("description"),
        FieldDescriptor::passthrough("performed_by"),
        FieldDescriptor::converted("cost", MEASUREMENT),
        FieldDescriptor::renamed("completed", "follow_up_needed", INVERTED_FLAG),
        FieldDescriptor::storage_only("result_notes", Fallback::EmptyText),
        FieldDescriptor::storage_only("follow_up_date", Fallback::Null),
        FieldDescriptor::storage_only("created_at", Fallback::Null),
        FieldDescriptor::storage_only("updated_at", Fallback::Null),
    ],
};

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use yare::parameterized;

#[parameterized(
    metric = { "metric", EntityKind::Metric },
    plural = { "inspections", EntityKind::Inspection },
    upper = { "ACTION", EntityKind::Action },
)]
fn test_capture_entity(arg: &str, expected: EntityKind) {
    let cli = Cli::try_parse_from(["canopy", "capture", arg, "-f", "tree_id=1"]).unwrap();
    match cli.command {
        Command::Capture { entity, .. } => assert_eq!(entity, expected),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_capture_fields_in_order() {
    let cli = Cli::try_parse_from([
        "canopy",
        "capture",
        "metric",
        "-f",
        "tree_id=12",
        "--field",
        "notes=split at=fork",
        "-f",
        "height=",
        "--offline",
    ])
    .unwrap();

    match cli.command {
        Command::Capture {
            fields, offline, ..
        } => {
            assert!(offline);
            assert_eq!(
                fields,
                vec![
                    ("tree_id".to_string(), "12".to_string()),
                    ("notes".to_string(), "split at=fork".to_string()),
                    ("height".to_string(), String::new()),
                ]
            );
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[parameterized(
    no_equals = { "height" },
    empty_key = { "=12" },
)]
fn test_capture_rejects_bad_assignment(field: &str) {
    let result = Cli::try_parse_from(["canopy", "capture", "metric", "-f", field]);
    assert!(result.is_err());
}

#[test]
fn test_capture_rejects_unknown_entity() {
    let err = Cli::try_parse_from(["canopy", "capture", "tree", "-f", "tree_id=1"]).unwrap_err();
    assert!(err.to_string().contains("invalid entity type"));
}

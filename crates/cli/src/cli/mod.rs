// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use canopy_core::EntityKind;
use clap::{Parser, Subcommand};

/// Parse an entity kind argument (`metric`, `inspections`, ...).
fn parse_entity(s: &str) -> Result<EntityKind, String> {
    s.parse::<EntityKind>().map_err(|e| e.to_string())
}

/// Parse a `key=value` field assignment, keeping the raw value.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

#[derive(Parser, Debug)]
#[command(name = "canopy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline-first capture and sync of tree field measurements")]
#[command(after_help = "\
Examples:
  canopy capture metric -f tree_id=12 -f height=12.5   Capture a measurement
  canopy capture action -f tree_id=12 -f action_type=pruning -f completed=true
  canopy queue                                        List records waiting to sync
  canopy sync                                         Send queued records")]
pub struct Cli {
    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Capture a record: send it, or save it locally when that fails
    Capture {
        /// Entity kind: metric, inspection or action
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,

        /// Field value as key=value; values parse as JSON, else as text
        #[arg(short = 'f', long = "field", value_name = "key=value", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,

        /// Treat the device as offline and save locally
        #[arg(long)]
        offline: bool,
    },

    /// List records waiting to be synced
    Queue {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send every queued record to the remote store
    Sync {
        /// Treat the device as offline
        #[arg(long)]
        offline: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use crate::config::Config;
use crate::error::Result;

/// Print the effective configuration as TOML, headed by its source.
pub fn run(config: &Config, path: &Path) -> Result<()> {
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };
    println!("# {}", source);
    println!("# queue: {}", config.queue_dir().display());
    print!("{}", config.to_toml()?);
    Ok(())
}

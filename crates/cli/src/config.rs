// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User configuration management.
//!
//! Configuration is stored in `<config dir>/canopy/config.toml` and includes:
//! - `[remote]`: base URL of the remote store and the request timeout
//! - `[queue]`: optional directory for the offline queue
//! - `[sync]`: which records a drain removes from the queue
//! - `[capture]`: how long a successful capture stays on screen
//!
//! Every section and key is optional; a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};
use crate::sync::RemovalPolicy;

const APP_DIR_NAME: &str = "canopy";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Effective configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub queue: QueueConfig,
    pub sync: SyncSettings,
    pub capture: CaptureConfig,
}

/// Remote store connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL; entity collections live directly under it.
    pub url: String,
    /// Per-request timeout in seconds (default: 10).
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            url: "http://localhost:3000/api".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Where the offline queue lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    pub removal: RemovalPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// How long `Success` is shown before the form returns to idle.
    pub success_display_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            success_display_ms: 3000,
        }
    }
}

impl Config {
    /// Loads configuration from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(Error::Config(format!("failed to read config: {}", e))),
        };
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Saves configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))
    }

    /// Applies environment overrides (`CANOPY_REMOTE_URL`, `CANOPY_DATA_DIR`).
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = env::remote_url() {
            self.remote.url = url;
        }
        if let Some(dir) = env::data_dir() {
            self.queue.dir = Some(dir);
        }
        self
    }

    /// Directory holding the offline queue.
    pub fn queue_dir(&self) -> PathBuf {
        match &self.queue.dir {
            Some(dir) => dir.clone(),
            None => default_data_dir(),
        }
    }

    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.capture.success_display_ms)
    }
}

/// Default config file: `CANOPY_CONFIG`, else `<config dir>/canopy/config.toml`.
pub fn default_config_path() -> PathBuf {
    env::config_path().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    })
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

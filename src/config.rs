//! User configuration
//!
//! Settings are read from `config.toml` in the base directory. Every key is
//! optional; missing keys fall back to the defaults below. `PROMPTVAULT_SLOT`
//! overrides the storage slot name.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SLOT: &str = "promptLibrary";

/// Written by `Storage::init` when no config exists yet
pub const DEFAULT_CONFIG: &str = r#"[storage]
slot = "promptLibrary"

[display]
preview_chars = 150
status_secs = 3
copied_label_secs = 2
"#;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    pub storage: StorageConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Name of the JSON slot holding the library
    pub slot: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            slot: DEFAULT_SLOT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Characters of content shown on a card before truncation
    pub preview_chars: usize,
    /// How long a status notice stays visible
    pub status_secs: u64,
    /// How long the copy button reads "Copied!"
    pub copied_label_secs: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            preview_chars: 150,
            status_secs: 3,
            copied_label_secs: 2,
        }
    }
}

impl DisplayConfig {
    pub fn status_duration(&self) -> Duration {
        Duration::from_secs(self.status_secs)
    }

    pub fn copied_label_duration(&self) -> Duration {
        Duration::from_secs(self.copied_label_secs)
    }
}

impl VaultConfig {
    /// Load configuration from `path`, then apply environment overrides
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::parse(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(slot) = env::var("PROMPTVAULT_SLOT") {
            if !slot.trim().is_empty() {
                config.storage.slot = slot.trim().to_string();
            }
        }

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

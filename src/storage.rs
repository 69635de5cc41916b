//! Durable storage for the prompt library
//!
//! The whole library lives in a single named JSON "slot" inside the PromptVault
//! base directory. Reads distinguish a missing slot from an unreadable one so
//! the library layer can decide to reseed; writes replace the slot atomically.

use anyhow::{Context, Result};
use dirs::home_dir;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::config::DEFAULT_SLOT;
use crate::prompt::Prompt;

/// Why the slot could not be turned into a prompt list
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("slot file {0} does not exist")]
    Missing(PathBuf),
    #[error("failed to read slot file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("slot file {path} is not a valid prompt array")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SlotError {
    /// Whether writing a fresh slot over this one loses nothing readable
    pub fn is_safe_to_overwrite(&self) -> bool {
        !matches!(self, SlotError::Io { .. })
    }
}

/// Handle on the base directory and the named slot inside it
#[derive(Debug, Clone)]
pub struct Storage {
    base_dir: PathBuf,
    slot: String,
}

impl Storage {
    /// Create a Storage rooted at `~/.promptvault`
    ///
    /// `PROMPTVAULT_BASE_DIR` overrides the location.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let base_dir = if let Ok(custom_dir) = std::env::var("PROMPTVAULT_BASE_DIR") {
            PathBuf::from(custom_dir)
        } else {
            home_dir()
                .context("Could not find home directory")?
                .join(".promptvault")
        };

        Ok(Self::new_with_base(base_dir))
    }

    /// Create a Storage with a custom base directory and the default slot
    pub fn new_with_base(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            slot: DEFAULT_SLOT.to_string(),
        }
    }

    /// Use a different slot name inside the same base directory
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn slot_path(&self) -> PathBuf {
        self.base_dir.join(format!("{}.json", self.slot))
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join("config.toml")
    }

    /// Create the base directory and a default config file if absent
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir).with_context(|| {
            format!("Failed to create directory: {}", self.base_dir.display())
        })?;

        let config_path = self.config_path();
        if !config_path.exists() {
            fs::write(&config_path, crate::config::DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
        }

        Ok(())
    }

    /// Read and decode the slot
    pub fn read_slot(&self) -> std::result::Result<Vec<Prompt>, SlotError> {
        let path = self.slot_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SlotError::Missing(path))
            }
            Err(source) => return Err(SlotError::Io { path, source }),
        };

        serde_json::from_str(&raw).map_err(|source| SlotError::Decode { path, source })
    }

    /// Serialize the full sequence and replace the slot
    pub fn write_slot(&self, prompts: &[Prompt]) -> Result<()> {
        fs::create_dir_all(&self.base_dir).with_context(|| {
            format!("Failed to create directory: {}", self.base_dir.display())
        })?;

        let content =
            serde_json::to_string_pretty(prompts).context("Failed to serialize prompt library")?;

        let path = self.slot_path();
        let mut temp = NamedTempFile::new_in(&self.base_dir)
            .with_context(|| format!("Failed to stage write for {}", path.display()))?;
        temp.write_all(content.as_bytes())?;
        temp.flush()?;
        temp.persist(&path)
            .with_context(|| format!("Failed to write slot file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_prompts;
    use tempfile::TempDir;

    #[test]
    fn test_missing_slot_is_reported_as_missing() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base(temp_dir.path().to_path_buf());

        assert!(matches!(storage.read_slot(), Err(SlotError::Missing(_))));
    }

    #[test]
    fn test_malformed_slot_is_a_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base(temp_dir.path().to_path_buf());
        fs::write(storage.slot_path(), "{\"not\": \"an array\"}").unwrap();

        assert!(matches!(storage.read_slot(), Err(SlotError::Decode { .. })));
    }

    #[test]
    fn test_write_then_read_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base(temp_dir.path().to_path_buf());
        let prompts = sample_prompts();

        storage.write_slot(&prompts).unwrap();
        let read_back = storage.read_slot().unwrap();

        assert_eq!(read_back, prompts);
    }

    #[test]
    fn test_slot_name_controls_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base(temp_dir.path().to_path_buf()).with_slot("work");

        assert_eq!(storage.slot_path(), temp_dir.path().join("work.json"));
    }

    #[test]
    fn test_init_writes_default_config_once() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base(temp_dir.path().join("vault"));

        storage.init().unwrap();
        assert!(storage.config_path().exists());

        fs::write(storage.config_path(), "[display]\npreview_chars = 80\n").unwrap();
        storage.init().unwrap();
        let content = fs::read_to_string(storage.config_path()).unwrap();
        assert!(content.contains("preview_chars = 80"));
    }
}

//! The prompt library: canonical in-memory records plus write-through persistence
//!
//! Every mutating operation updates the record list and immediately rewrites
//! the slot, so the durable copy always matches what was last rendered.
//! Operations on an unknown id are silent no-ops.

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::logging::log_store_operation;
use crate::prompt::Prompt;
use crate::seed::sample_prompts;
use crate::storage::{SlotError, Storage};

/// Split a comma-separated tag list, trimming entries and dropping empty ones
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct PromptLibrary {
    storage: Storage,
    prompts: Vec<Prompt>,
}

impl PromptLibrary {
    /// Load the library from the slot, seeding it when absent or unreadable
    ///
    /// Never fails. A missing or malformed slot is replaced by the samples; a
    /// slot that exists but cannot be read is left untouched on disk.
    pub fn load(storage: Storage) -> Self {
        match storage.read_slot() {
            Ok(prompts) => {
                log_store_operation("load", None, true);
                Self { storage, prompts }
            }
            Err(err) => {
                match &err {
                    SlotError::Missing(path) => {
                        info!(path = %path.display(), "No prompt library yet, seeding samples")
                    }
                    other => warn!(error = %other, "Prompt library unreadable, reseeding samples"),
                }

                let library = Self {
                    storage,
                    prompts: sample_prompts(),
                };
                if !err.is_safe_to_overwrite() {
                    warn!("Keeping the existing slot file; samples are in memory only");
                } else if let Err(e) = library.save() {
                    warn!(error = %e, "Failed to persist seeded library");
                }
                library
            }
        }
    }

    /// Serialize the full sequence and overwrite the slot
    pub fn save(&self) -> Result<()> {
        let result = self.storage.write_slot(&self.prompts);
        log_store_operation("save", None, result.is_ok());
        result
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn get(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Distinct tags in first-seen store order
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.prompts.iter().flat_map(|p| p.tags.iter()) {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag.as_str());
            }
        }
        tags
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.prompts.iter().position(|p| p.id == id)
    }

    /// Append a new prompt and persist it
    pub fn create(&mut self, title: &str, content: &str, raw_tags: &str) -> Result<Prompt> {
        let now = Utc::now();
        let prompt = Prompt {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: None,
            content: content.to_string(),
            tags: parse_tags(raw_tags),
            favorite: false,
            created_at: now,
            modified_at: now,
            use_count: 0,
        };

        self.prompts.push(prompt.clone());
        self.save()?;
        log_store_operation("create", Some(&prompt.id), true);
        Ok(prompt)
    }

    /// Overwrite title, content and tags. Returns false for an unknown id.
    pub fn edit(&mut self, id: &str, title: &str, content: &str, raw_tags: &str) -> Result<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let prompt = &mut self.prompts[index];
        prompt.title = title.to_string();
        prompt.content = content.to_string();
        prompt.tags = parse_tags(raw_tags);
        prompt.modified_at = Utc::now().max(prompt.created_at);

        self.save()?;
        log_store_operation("edit", Some(id), true);
        Ok(true)
    }

    /// Remove a prompt. Returns false for an unknown id.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        self.prompts.remove(index);
        self.save()?;
        log_store_operation("remove", Some(id), true);
        Ok(true)
    }

    /// Flip the favorite flag, returning the new state
    pub fn toggle_favorite(&mut self, id: &str) -> Result<Option<bool>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let prompt = &mut self.prompts[index];
        prompt.favorite = !prompt.favorite;
        let favorite = prompt.favorite;

        self.save()?;
        log_store_operation("toggle_favorite", Some(id), true);
        Ok(Some(favorite))
    }

    /// Count one more copy of the prompt, returning the new count
    pub fn record_use(&mut self, id: &str) -> Result<Option<u32>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let prompt = &mut self.prompts[index];
        prompt.use_count = prompt.use_count.saturating_add(1);
        let count = prompt.use_count;

        self.save()?;
        log_store_operation("record_use", Some(id), true);
        Ok(Some(count))
    }
}

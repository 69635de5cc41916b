//! The prompt record
//!
//! A single prompt is the only entity PromptVault stores. Records are kept in
//! one ordered array and serialized with camelCase keys so the slot file reads
//! `{id, title, content, tags, favorite, createdAt, modifiedAt, useCount}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reusable text prompt plus its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    /// Stable unique identifier, assigned at creation
    pub id: String,
    /// Display title, never empty
    pub title: String,
    /// Optional one-line summary shown on cards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The payload copied to the clipboard
    pub content: String,
    /// Ordered labels, trimmed, empty entries dropped
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    /// Number of times the content was copied
    #[serde(default)]
    pub use_count: u32,
}

impl Prompt {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Description line for cards; drafts without one get a generated line
    pub fn summary(&self) -> String {
        match self.description.as_deref() {
            Some(desc) if !desc.trim().is_empty() => desc.to_string(),
            _ => format!("Prompt for {}", self.title),
        }
    }

    /// Case-insensitive substring test over title, content, description and tags.
    /// `needle` must already be lower-cased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

use chrono::{DateTime, Utc};

use crate::prompt::Prompt;

/// Render a timestamp as `April 8, 2025`
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

/// Full view of one prompt in the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub added: String,
    pub modified: String,
    pub used: String,
    pub description: String,
    pub content: String,
    pub favorite: bool,
    pub favorite_label: &'static str,
    pub copy_label: &'static str,
}

impl DetailView {
    /// `copied` is true while the copy confirmation should still be shown
    pub fn from_prompt(prompt: &Prompt, copied: bool) -> Self {
        Self {
            id: prompt.id.clone(),
            title: prompt.title.clone(),
            tags: prompt.tags.clone(),
            added: format!("Added: {}", format_date(&prompt.created_at)),
            modified: format!("Modified: {}", format_date(&prompt.modified_at)),
            used: format!("Used: {} times", prompt.use_count),
            description: prompt.summary(),
            content: prompt.content.clone(),
            favorite: prompt.favorite,
            favorite_label: if prompt.favorite {
                "★ Favorite"
            } else {
                "☆ Add to Favorites"
            },
            copy_label: if copied { "Copied!" } else { "Copy Prompt" },
        }
    }
}

/// Which prompt, if any, the detail overlay shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailOverlay {
    #[default]
    Closed,
    Open(String),
}

impl DetailOverlay {
    /// Show `id`, replacing whatever was open
    pub fn open(&mut self, id: impl Into<String>) {
        *self = DetailOverlay::Open(id.into());
    }

    pub fn close(&mut self) {
        *self = DetailOverlay::Closed;
    }

    pub fn open_id(&self) -> Option<&str> {
        match self {
            DetailOverlay::Open(id) => Some(id),
            DetailOverlay::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DetailOverlay::Open(_))
    }
}

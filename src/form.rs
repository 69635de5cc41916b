//! Create/edit form contents and validation

use thiserror::Error;

use crate::prompt::Prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Content is required")]
    MissingContent,
}

/// Raw user input for a prompt; tags stay a comma list until the store parses them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptForm {
    pub title: String,
    pub tags: String,
    pub content: String,
}

impl PromptForm {
    pub fn new(title: impl Into<String>, tags: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tags: tags.into(),
            content: content.into(),
        }
    }

    /// Pre-fill from an existing record for editing
    pub fn from_prompt(prompt: &Prompt) -> Self {
        Self {
            title: prompt.title.clone(),
            tags: prompt.tags.join(", "),
            content: prompt.content.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::MissingTitle);
        }
        if self.content.trim().is_empty() {
            return Err(FormError::MissingContent);
        }
        Ok(())
    }
}

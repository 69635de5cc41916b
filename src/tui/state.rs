use std::time::{Duration, Instant};

use crate::controller::Notice;
use crate::form::PromptForm;
use crate::prompt::Prompt;

/// What the keyboard currently drives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a search term; submitted with Enter
    Search,
    Form,
    /// Waiting for `y` to delete the given id
    ConfirmDelete(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Tags,
    Content,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Tags,
            FormField::Tags => FormField::Content,
            FormField::Content => FormField::Title,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Title => FormField::Content,
            FormField::Tags => FormField::Title,
            FormField::Content => FormField::Tags,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Tags => "Tags (comma separated)",
            FormField::Content => "Prompt Content",
        }
    }
}

/// The create/edit modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Id being edited, None when creating
    pub editing: Option<String>,
    pub form: PromptForm,
    pub field: FormField,
    pub error: Option<String>,
}

impl FormState {
    pub fn create() -> Self {
        Self {
            editing: None,
            form: PromptForm::default(),
            field: FormField::Title,
            error: None,
        }
    }

    pub fn edit(prompt: &Prompt) -> Self {
        Self {
            editing: Some(prompt.id.clone()),
            form: PromptForm::from_prompt(prompt),
            field: FormField::Title,
            error: None,
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.editing.is_some() {
            " Edit Prompt "
        } else {
            " Create New Prompt "
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.form.title,
            FormField::Tags => &self.form.tags,
            FormField::Content => &self.form.content,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Title => &mut self.form.title,
            FormField::Tags => &mut self.form.tags,
            FormField::Content => &mut self.form.content,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.error = None;
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    /// Enter adds a line break in the content field and moves on elsewhere
    pub fn enter(&mut self) {
        match self.field {
            FormField::Content => self.insert_char('\n'),
            _ => self.field = self.field.next(),
        }
    }
}

/// Notice currently shown in the status bar
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub notice: Notice,
    shown_at: Instant,
}

impl StatusLine {
    pub fn new(notice: Notice) -> Self {
        Self {
            notice,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.shown_at.elapsed() >= ttl
    }
}

/// Keep a list cursor inside `0..len`
pub fn clamp_selection(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(selected.unwrap_or(0).min(len - 1))
    }
}

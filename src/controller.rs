//! The view controller
//!
//! `VaultController` owns the library, the current selection and the detail
//! overlay. Surfaces call it for every user action, then redraw from
//! `grid()`/`detail()`. Each action returns a [`Notice`] for the status line
//! instead of printing anything itself.

use anyhow::Result;
use std::time::Instant;
use tracing::{debug, warn};

use crate::clipboard::ClipboardSink;
use crate::config::DisplayConfig;
use crate::form::PromptForm;
use crate::library::PromptLibrary;
use crate::prompt::Prompt;
use crate::query::{self, Selection, SortKey, ViewTab, ALL_TAGS};
use crate::view::{DetailOverlay, DetailView, Grid};

pub const DELETE_QUESTION: &str = "Are you sure you want to delete this prompt?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Short message for the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Yes/no question asked before a destructive action
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}

pub struct VaultController {
    library: PromptLibrary,
    selection: Selection,
    overlay: DetailOverlay,
    display: DisplayConfig,
    copied_until: Option<Instant>,
}

impl VaultController {
    pub fn new(library: PromptLibrary, display: DisplayConfig) -> Self {
        Self {
            library,
            selection: Selection::default(),
            overlay: DetailOverlay::default(),
            display,
            copied_until: None,
        }
    }

    pub fn library(&self) -> &PromptLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut PromptLibrary {
        &mut self.library
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn overlay(&self) -> &DetailOverlay {
        &self.overlay
    }

    // Selection

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.selection.tag = tag.into();
    }

    pub fn set_view(&mut self, view: ViewTab) {
        self.selection.view = view;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.selection.sort = sort;
    }

    pub fn submit_search(&mut self, term: &str) {
        self.selection.search = term.trim().to_string();
    }

    /// Step through `tag_filters()`; an unknown current tag restarts at "All"
    pub fn cycle_tag(&mut self, forward: bool) {
        let filters = self.tag_filters();
        let len = filters.len();
        let next = match filters.iter().position(|t| *t == self.selection.tag) {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None => 0,
        };
        self.selection.tag = filters[next].clone();
    }

    pub fn cycle_sort(&mut self) {
        self.selection.sort = self.selection.sort.next();
    }

    pub fn toggle_view(&mut self) {
        self.selection.view = self.selection.view.toggled();
    }

    // Projections

    pub fn visible(&self) -> Vec<&Prompt> {
        query::visible(self.library.prompts(), &self.selection)
    }

    pub fn grid(&self) -> Grid {
        Grid::build(&self.visible(), self.display.preview_chars)
    }

    /// The open prompt, or None when the overlay is closed
    pub fn detail(&self) -> Option<DetailView> {
        let id = self.overlay.open_id()?;
        let prompt = self.library.get(id)?;
        Some(DetailView::from_prompt(prompt, self.is_copied()))
    }

    /// "All" followed by every distinct tag in the store
    pub fn tag_filters(&self) -> Vec<String> {
        std::iter::once(ALL_TAGS)
            .chain(self.library.tags())
            .map(str::to_string)
            .collect()
    }

    fn is_copied(&self) -> bool {
        self.copied_until
            .is_some_and(|until| Instant::now() < until)
    }

    // Overlay

    pub fn open(&mut self, id: &str) {
        if self.library.get(id).is_some() {
            self.copied_until = None;
            self.overlay.open(id);
        }
    }

    pub fn close(&mut self) {
        self.copied_until = None;
        self.overlay.close();
    }

    // Mutations

    pub fn toggle_favorite(&mut self, id: &str) -> Result<Option<Notice>> {
        let notice = self.library.toggle_favorite(id)?.map(|favorite| {
            if favorite {
                Notice::success("Added to favorites!")
            } else {
                Notice::success("Removed from favorites!")
            }
        });
        Ok(notice)
    }

    /// Validate and create; returns the new prompt's id with the notice
    pub fn create(&mut self, form: &PromptForm) -> Result<(String, Notice)> {
        form.validate()?;
        let prompt = self.library.create(&form.title, &form.content, &form.tags)?;
        debug!(prompt_id = %prompt.id, "Prompt created");
        Ok((prompt.id, Notice::success("Prompt created successfully!")))
    }

    pub fn edit(&mut self, id: &str, form: &PromptForm) -> Result<Option<Notice>> {
        form.validate()?;
        if !self
            .library
            .edit(id, &form.title, &form.content, &form.tags)?
        {
            return Ok(None);
        }

        self.close();
        Ok(Some(Notice::success("Prompt updated successfully!")))
    }

    /// Ask `confirm`, then remove. Declining leaves the store untouched.
    pub fn delete<C>(&mut self, id: &str, confirm: &mut C) -> Result<Option<Notice>>
    where
        C: Confirm + ?Sized,
    {
        if self.library.get(id).is_none() {
            return Ok(None);
        }
        if !confirm.confirm(DELETE_QUESTION) {
            debug!(prompt_id = id, "Delete declined");
            return Ok(None);
        }

        self.library.remove(id)?;
        if self.overlay.open_id() == Some(id) {
            self.close();
        }
        Ok(Some(Notice::success("Prompt deleted successfully!")))
    }

    /// Copy the open prompt's content and count the use
    ///
    /// A clipboard failure is reported as an error notice and leaves the
    /// use count untouched.
    pub fn copy_open(&mut self, clipboard: &mut dyn ClipboardSink) -> Result<Notice> {
        let Some(prompt) = self.overlay.open_id().and_then(|id| self.library.get(id)) else {
            return Ok(Notice::info("Open a prompt to copy it"));
        };
        let id = prompt.id.clone();

        if let Err(e) = clipboard.write_text(&prompt.content) {
            warn!(prompt_id = %id, error = %e, "Clipboard write failed");
            return Ok(Notice::error(format!("Failed to copy prompt: {}", e)));
        }

        self.library.record_use(&id)?;
        self.copied_until = Some(Instant::now() + self.display.copied_label_duration());
        Ok(Notice::success("Prompt copied to clipboard!"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::fake::FakeClipboard;
    use crate::form::FormError;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn create_test_controller() -> (VaultController, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base(temp_dir.path().to_path_buf());
        let library = PromptLibrary::load(storage);
        (
            VaultController::new(library, DisplayConfig::default()),
            temp_dir,
        )
    }

    fn visible_ids(controller: &VaultController) -> Vec<String> {
        controller.visible().iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_favorites_tab_on_fresh_store() {
        let (mut controller, _temp) = create_test_controller();
        controller.toggle_view();
        assert_eq!(controller.selection().view, ViewTab::Favorites);
        assert_eq!(visible_ids(&controller), vec!["prompt-6", "prompt-3"]);
    }

    #[test]
    fn test_submit_search_trims() {
        let (mut controller, _temp) = create_test_controller();
        controller.submit_search("  python  ");
        assert_eq!(controller.selection().search, "python");
        assert_eq!(visible_ids(&controller), vec!["prompt-2"]);
    }

    #[test]
    fn test_empty_result_renders_placeholder() {
        let (mut controller, _temp) = create_test_controller();
        controller.submit_search("no such words anywhere");
        assert!(matches!(controller.grid(), Grid::Empty { .. }));
    }

    #[test]
    fn test_cycle_tag_wraps_both_ways() {
        let (mut controller, _temp) = create_test_controller();
        let filters = controller.tag_filters();
        assert_eq!(filters[0], "All");
        assert_eq!(filters.len(), 11);

        controller.cycle_tag(true);
        assert_eq!(controller.selection().tag, "Business");
        controller.cycle_tag(false);
        controller.cycle_tag(false);
        assert_eq!(controller.selection().tag, "Best Practices");

        controller.set_tag("Gone");
        controller.cycle_tag(true);
        assert_eq!(controller.selection().tag, "All");
    }

    #[test]
    fn test_open_unknown_id_is_noop() {
        let (mut controller, _temp) = create_test_controller();
        controller.open("missing");
        assert!(controller.detail().is_none());

        controller.open("prompt-2");
        assert_eq!(controller.detail().unwrap().title, "Python Debugging Assistant");
        controller.close();
        assert!(controller.detail().is_none());
    }

    #[test]
    fn test_toggle_favorite_notices() {
        let (mut controller, _temp) = create_test_controller();
        assert_eq!(
            controller.toggle_favorite("prompt-1").unwrap().unwrap().message,
            "Added to favorites!"
        );
        assert_eq!(
            controller.toggle_favorite("prompt-1").unwrap().unwrap().message,
            "Removed from favorites!"
        );
        assert!(controller.toggle_favorite("missing").unwrap().is_none());
    }

    #[test]
    fn test_create_rejects_invalid_form_before_store() {
        let (mut controller, _temp) = create_test_controller();
        let err = controller
            .create(&PromptForm::new("", "x", "body"))
            .unwrap_err();
        assert_eq!(err.downcast_ref::<FormError>(), Some(&FormError::MissingTitle));
        assert_eq!(controller.library().prompts().len(), 6);
    }

    #[test]
    fn test_create_then_visible() {
        let (mut controller, _temp) = create_test_controller();
        let (id, notice) = controller
            .create(&PromptForm::new("Release Notes", "Ops, Writing", "Summarize"))
            .unwrap();
        assert_eq!(notice.message, "Prompt created successfully!");
        assert_eq!(visible_ids(&controller)[0], id);
    }

    #[test]
    fn test_edit_closes_overlay() {
        let (mut controller, _temp) = create_test_controller();
        controller.open("prompt-4");
        let notice = controller
            .edit("prompt-4", &PromptForm::new("Research", "Academic", "Help me"))
            .unwrap()
            .unwrap();
        assert_eq!(notice.message, "Prompt updated successfully!");
        assert!(!controller.overlay().is_open());
        assert_eq!(controller.library().get("prompt-4").unwrap().title, "Research");
    }

    #[test]
    fn test_delete_declined_keeps_prompt() {
        let (mut controller, _temp) = create_test_controller();
        let mut asked = Vec::new();
        let mut decline = |q: &str| {
            asked.push(q.to_string());
            false
        };

        assert!(controller.delete("prompt-2", &mut decline).unwrap().is_none());
        assert_eq!(asked, vec![DELETE_QUESTION]);
        assert!(controller.library().get("prompt-2").is_some());
        assert_eq!(controller.library().storage().read_slot().unwrap().len(), 6);
    }

    #[test]
    fn test_delete_accepted_removes_everywhere() {
        let (mut controller, _temp) = create_test_controller();
        controller.open("prompt-2");
        let notice = controller
            .delete("prompt-2", &mut |_: &str| true)
            .unwrap()
            .unwrap();

        assert_eq!(notice.message, "Prompt deleted successfully!");
        assert!(!controller.overlay().is_open());
        assert!(!visible_ids(&controller).contains(&"prompt-2".to_string()));
        let stored = controller.library().storage().read_slot().unwrap();
        assert!(stored.iter().all(|p| p.id != "prompt-2"));
    }

    #[test]
    fn test_copy_success_counts_use() {
        let (mut controller, _temp) = create_test_controller();
        let mut clipboard = FakeClipboard::default();
        controller.open("prompt-4");

        let notice = controller.copy_open(&mut clipboard).unwrap();
        assert_eq!(notice, Notice::success("Prompt copied to clipboard!"));
        assert_eq!(clipboard.copied.len(), 1);
        assert!(clipboard.copied[0].starts_with("As an experienced academic"));

        let detail = controller.detail().unwrap();
        assert_eq!(detail.used, "Used: 6 times");
        assert_eq!(detail.copy_label, "Copied!");
    }

    #[test]
    fn test_copy_failure_is_error_notice() {
        let (mut controller, _temp) = create_test_controller();
        let mut clipboard = FakeClipboard {
            broken: true,
            ..FakeClipboard::default()
        };
        controller.open("prompt-4");

        let notice = controller.copy_open(&mut clipboard).unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Failed to copy prompt: permission denied");
        assert_eq!(controller.library().get("prompt-4").unwrap().use_count, 5);
        assert_eq!(controller.detail().unwrap().copy_label, "Copy Prompt");
    }

    #[test]
    fn test_copy_without_open_prompt() {
        let (mut controller, _temp) = create_test_controller();
        let mut clipboard = FakeClipboard::default();
        let notice = controller.copy_open(&mut clipboard).unwrap();
        assert_eq!(notice, Notice::info("Open a prompt to copy it"));
        assert!(clipboard.copied.is_empty());
    }
}

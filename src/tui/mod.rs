use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tracing::{debug, warn};

use crate::clipboard::{Clipboard, ClipboardSink};
use crate::controller::{Notice, NoticeLevel, VaultController};
use crate::form::FormError;
use crate::view::{Card, DetailView, Grid};

pub mod state;

pub use state::*;

/// Event poll interval; short enough for timed labels to revert promptly
const TICK: Duration = Duration::from_millis(250);

const BORDER: Color = Color::Rgb(60, 66, 78);
const MUTED: Color = Color::Rgb(140, 150, 160);
const TEXT: Color = Color::Rgb(200, 205, 215);
const ACCENT: Color = Color::Rgb(255, 200, 87);

/// Interactive prompt library
pub struct VaultTui {
    controller: VaultController,
    clipboard: Box<dyn ClipboardSink>,
    pub list_state: ListState,
    pub mode: InputMode,
    search_input: String,
    form: Option<FormState>,
    status: Option<StatusLine>,
    detail_scroll: u16,
    help_visible: bool,
}

impl VaultTui {
    pub fn new(controller: VaultController) -> Self {
        Self::with_clipboard(controller, Box::new(Clipboard::new()))
    }

    pub fn with_clipboard(controller: VaultController, clipboard: Box<dyn ClipboardSink>) -> Self {
        let mut tui = Self {
            controller,
            clipboard,
            list_state: ListState::default(),
            mode: InputMode::Normal,
            search_input: String::new(),
            form: None,
            status: None,
            detail_scroll: 0,
            help_visible: false,
        };
        tui.clamp_cursor();
        tui
    }

    pub fn controller(&self) -> &VaultController {
        &self.controller
    }

    pub fn status(&self) -> Option<&Notice> {
        self.status.as_ref().map(|s| &s.notice)
    }

    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    pub fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_app(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.ui(f))?;

            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        return Ok(());
                    }
                }
            }

            let ttl = self.controller.display().status_duration();
            if self.status.as_ref().is_some_and(|s| s.is_expired(ttl)) {
                self.status = None;
            }
        }
    }

    fn set_status(&mut self, notice: Notice) {
        self.status = Some(StatusLine::new(notice));
    }

    /// Turn an action's outcome into a status notice; store errors are not fatal
    fn report(&mut self, result: Result<Option<Notice>>) {
        match result {
            Ok(Some(notice)) => self.set_status(notice),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Action failed");
                self.set_status(Notice::error(format!("{:#}", e)));
            }
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.controller.visible().len();
        self.list_state
            .select(clamp_selection(self.list_state.selected(), len));
    }

    fn select_id(&mut self, id: &str) {
        if let Some(index) = self.controller.visible().iter().position(|p| p.id == id) {
            self.list_state.select(Some(index));
        }
    }

    /// Id under the cursor
    pub fn selected_id(&self) -> Option<String> {
        let index = self.list_state.selected()?;
        self.controller
            .visible()
            .get(index)
            .map(|p| p.id.clone())
    }

    /// The open prompt if the overlay is up, else the one under the cursor
    fn target_id(&self) -> Option<String> {
        self.controller
            .overlay()
            .open_id()
            .map(str::to_string)
            .or_else(|| self.selected_id())
    }

    /// Handle one key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.help_visible {
            self.help_visible = false;
            return false;
        }

        match self.mode.clone() {
            InputMode::Search => self.handle_search_input(key),
            InputMode::Form => self.handle_form_input(key),
            InputMode::ConfirmDelete(id) => self.handle_delete_confirmation(key, &id),
            InputMode::Normal if self.controller.overlay().is_open() => {
                self.handle_detail_input(key)
            }
            InputMode::Normal => return self.handle_navigation_input(key),
        }

        self.clamp_cursor();
        false
    }

    fn handle_navigation_input(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.help_visible = true,
            KeyCode::Char('j') | KeyCode::Down => self.next(),
            KeyCode::Char('k') | KeyCode::Up => self.previous(),
            KeyCode::Char('g') | KeyCode::Home => self.list_state.select(Some(0)),
            KeyCode::Char('G') | KeyCode::End => {
                let len = self.controller.visible().len();
                self.list_state.select(len.checked_sub(1));
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    self.detail_scroll = 0;
                    self.controller.open(&id);
                }
            }
            KeyCode::Esc => {
                if !self.controller.selection().search.is_empty() {
                    self.controller.submit_search("");
                }
            }
            KeyCode::Char('/') => {
                self.search_input = self.controller.selection().search.clone();
                self.mode = InputMode::Search;
            }
            KeyCode::Char('t') => {
                self.controller.cycle_tag(true);
                self.list_state.select(Some(0));
            }
            KeyCode::Char('T') => {
                self.controller.cycle_tag(false);
                self.list_state.select(Some(0));
            }
            KeyCode::Tab => {
                self.controller.toggle_view();
                self.list_state.select(Some(0));
            }
            KeyCode::Char('s') => self.controller.cycle_sort(),
            KeyCode::Char('f') => self.toggle_favorite(),
            KeyCode::Char('c') => self.copy_open(),
            KeyCode::Char('n') => self.start_form(None),
            KeyCode::Char('e') => self.start_form(self.target_id()),
            KeyCode::Char('d') => self.start_delete(),
            _ => {}
        }

        self.clamp_cursor();
        false
    }

    fn handle_detail_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.controller.close(),
            KeyCode::Char('?') => self.help_visible = true,
            KeyCode::Char('j') | KeyCode::Down => {
                self.detail_scroll = self.detail_scroll.saturating_add(1)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1)
            }
            KeyCode::Char('f') => self.toggle_favorite(),
            KeyCode::Char('c') => self.copy_open(),
            KeyCode::Char('e') => self.start_form(self.target_id()),
            KeyCode::Char('d') => self.start_delete(),
            _ => {}
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let term = std::mem::take(&mut self.search_input);
                self.controller.submit_search(&term);
                self.list_state.select(Some(0));
                self.mode = InputMode::Normal;
            }
            KeyCode::Esc => {
                self.search_input.clear();
                self.mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char(c) => self.search_input.push(c),
            _ => {}
        }
    }

    fn handle_form_input(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            self.mode = InputMode::Normal;
            return;
        };

        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.save_form();
            }
            KeyCode::Esc => {
                self.form = None;
                self.mode = InputMode::Normal;
            }
            KeyCode::Tab => form.field = form.field.next(),
            KeyCode::BackTab => form.field = form.field.previous(),
            KeyCode::Enter => form.enter(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.insert_char(c),
            _ => {}
        }
    }

    fn handle_delete_confirmation(&mut self, key: KeyEvent, id: &str) {
        self.mode = InputMode::Normal;
        let accepted = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
        let result = self.controller.delete(id, &mut |_: &str| accepted);
        match result {
            Ok(None) if !accepted => self.set_status(Notice::info("Deletion cancelled")),
            other => self.report(other),
        }
    }

    fn next(&mut self) {
        let len = self.controller.visible().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous(&mut self) {
        let i = self.list_state.selected().unwrap_or(0).saturating_sub(1);
        self.list_state.select(Some(i));
    }

    fn toggle_favorite(&mut self) {
        if let Some(id) = self.target_id() {
            let result = self.controller.toggle_favorite(&id);
            self.report(result);
        }
    }

    fn copy_open(&mut self) {
        let result = self.controller.copy_open(self.clipboard.as_mut());
        self.report(result.map(Some));
    }

    fn start_form(&mut self, editing: Option<String>) {
        let state = match editing {
            Some(id) => match self.controller.library().get(&id) {
                Some(prompt) => FormState::edit(prompt),
                None => return,
            },
            None => FormState::create(),
        };
        self.form = Some(state);
        self.mode = InputMode::Form;
    }

    fn start_delete(&mut self) {
        if let Some(id) = self.target_id() {
            self.mode = InputMode::ConfirmDelete(id);
        }
    }

    fn save_form(&mut self) {
        let Some(state) = self.form.clone() else {
            return;
        };

        let result = match &state.editing {
            Some(id) => self.controller.edit(id, &state.form),
            None => self.controller.create(&state.form).map(|(id, notice)| {
                debug!(prompt_id = %id, "Selecting new prompt");
                self.select_id(&id);
                Some(notice)
            }),
        };

        match result {
            Err(e) if e.downcast_ref::<FormError>().is_some() => {
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(e.to_string());
                }
            }
            other => {
                self.form = None;
                self.mode = InputMode::Normal;
                self.report(other);
            }
        }
    }

    // Drawing

    fn ui(&mut self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.draw_header(f, rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);

        let grid = self.controller.grid();
        self.draw_card_list(f, columns[0], &grid);
        self.draw_card_preview(f, columns[1], &grid);
        self.draw_status_bar(f, rows[2]);

        if let Some(detail) = self.controller.detail() {
            self.draw_detail(f, &detail);
        }
        if self.form.is_some() {
            self.draw_form(f);
        }
        if let InputMode::ConfirmDelete(id) = &self.mode {
            self.draw_delete_confirmation(f, id);
        }
        if self.help_visible {
            self.draw_help_overlay(f);
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let selection = self.controller.selection();
        let tab = |label: &'static str, active: bool| {
            if active {
                Span::styled(
                    format!(" {} ", label),
                    Style::default()
                        .fg(Color::Black)
                        .bg(ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!(" {} ", label), Style::default().fg(MUTED))
            }
        };

        let search = match self.mode {
            InputMode::Search => format!("{}▏", self.search_input),
            _ if selection.search.is_empty() => "-".to_string(),
            _ => selection.search.clone(),
        };

        let line = Line::from(vec![
            tab("All Prompts", selection.view == crate::query::ViewTab::AllPrompts),
            Span::raw(" "),
            tab("Favorites", selection.view == crate::query::ViewTab::Favorites),
            Span::styled("   Tag: ", Style::default().fg(MUTED)),
            Span::styled(selection.tag.clone(), Style::default().fg(TEXT)),
            Span::styled("   Sort: ", Style::default().fg(MUTED)),
            Span::styled(selection.sort.as_str(), Style::default().fg(TEXT)),
            Span::styled("   Search: ", Style::default().fg(MUTED)),
            Span::styled(search, Style::default().fg(TEXT)),
        ]);

        let header = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" PromptVault ")
                .border_style(Style::default().fg(BORDER)),
        );
        f.render_widget(header, area);
    }

    fn draw_card_list(&mut self, f: &mut Frame, area: Rect, grid: &Grid) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Prompts • {} ", grid.len()))
            .border_style(Style::default().fg(BORDER));

        let cards = match grid {
            Grid::Cards(cards) => cards,
            Grid::Empty { message } => {
                let empty = Paragraph::new(*message)
                    .block(block)
                    .style(Style::default().fg(MUTED))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true });
                f.render_widget(empty, area);
                return;
            }
        };

        let items: Vec<ListItem> = cards
            .iter()
            .map(|card| {
                let star = if card.favorite { "★ " } else { "  " };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(star, Style::default().fg(ACCENT)),
                        Span::styled(
                            card.title.clone(),
                            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", card.tags.join(" · ")),
                        Style::default().fg(MUTED),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::Rgb(45, 50, 59))
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_card_preview(&self, f: &mut Frame, area: Rect, grid: &Grid) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Preview ")
            .border_style(Style::default().fg(BORDER));

        let card: Option<&Card> = match (grid, self.list_state.selected()) {
            (Grid::Cards(cards), Some(index)) => cards.get(index),
            _ => None,
        };

        let Some(card) = card else {
            let empty = Paragraph::new("No prompt selected")
                .block(block)
                .style(Style::default().fg(MUTED))
                .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(
                card.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.description.clone(),
                Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
        ];
        lines.extend(card.preview.lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            card.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" "),
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] View details",
            Style::default().fg(MUTED),
        )));

        let preview = Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(TEXT))
            .wrap(Wrap { trim: false });
        f.render_widget(preview, area);
    }

    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let (text, color) = match &self.status {
            Some(status) => (
                format!(" {}", status.notice.message),
                match status.notice.level {
                    NoticeLevel::Success => Color::LightGreen,
                    NoticeLevel::Error => Color::LightRed,
                    NoticeLevel::Info => TEXT,
                },
            ),
            None => {
                let hint = match self.mode {
                    InputMode::Search => " [Enter] Search • [Esc] Cancel • Type to search...",
                    InputMode::Form => " [Tab] Next field • [Ctrl+S] Save • [Esc] Cancel",
                    InputMode::ConfirmDelete(_) => " [y] Delete • any other key cancels",
                    InputMode::Normal if self.controller.overlay().is_open() => {
                        " [c] Copy • [f] Favorite • [e] Edit • [d] Delete • [Esc] Close"
                    }
                    InputMode::Normal => {
                        " [j/k] Move • [Enter] Open • [/] Search • [t] Tag • [Tab] Favorites • [s] Sort • [n] New • [?] Help • [q] Quit"
                    }
                };
                (hint.to_string(), MUTED)
            }
        };

        let status = Paragraph::new(text)
            .style(Style::default().bg(Color::Rgb(35, 38, 45)).fg(color));
        f.render_widget(status, area);
    }

    fn draw_detail(&self, f: &mut Frame, detail: &DetailView) {
        let area = centered_rect(80, 80, f.area());
        f.render_widget(Clear, area);

        let mut lines = vec![
            Line::from(Span::styled(
                detail.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                detail.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" "),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(Span::styled(
                format!("{}  •  {}  •  {}", detail.added, detail.modified, detail.used),
                Style::default().fg(MUTED),
            )),
            Line::from(""),
            Line::from(Span::styled(
                detail.description.clone(),
                Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
        ];
        lines.extend(detail.content.lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                format!("[f] {}", detail.favorite_label),
                Style::default().fg(ACCENT),
            ),
            Span::raw("   "),
            Span::styled(
                format!("[c] {}", detail.copy_label),
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Prompt ")
                    .border_style(Style::default().fg(BORDER))
                    .style(Style::default().bg(Color::Rgb(25, 28, 35))),
            )
            .style(Style::default().fg(TEXT))
            .wrap(Wrap { trim: false })
            .scroll((self.detail_scroll, 0));

        f.render_widget(paragraph, area);
    }

    fn draw_form(&self, f: &mut Frame) {
        let Some(state) = &self.form else {
            return;
        };
        let area = centered_rect(70, 70, f.area());
        f.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(state.heading())
            .border_style(Style::default().fg(Color::White))
            .style(Style::default().bg(Color::Rgb(25, 28, 35)));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        for (field, row) in [
            (FormField::Title, rows[0]),
            (FormField::Tags, rows[1]),
            (FormField::Content, rows[2]),
        ] {
            let focused = state.field == field;
            let mut value = state.value(field).to_string();
            if focused {
                value.push('▏');
            }
            let input = Paragraph::new(value)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" {} ", field.label()))
                        .border_style(Style::default().fg(if focused { ACCENT } else { BORDER })),
                )
                .style(Style::default().fg(TEXT))
                .wrap(Wrap { trim: false });
            f.render_widget(input, row);
        }

        if let Some(error) = &state.error {
            let message = Paragraph::new(error.as_str()).style(Style::default().fg(Color::LightRed));
            f.render_widget(message, rows[3]);
        }
    }

    fn draw_delete_confirmation(&self, f: &mut Frame, id: &str) {
        let area = centered_rect(60, 25, f.area());
        f.render_widget(Clear, area);

        let title = self
            .controller
            .library()
            .get(id)
            .map(|p| p.title.clone())
            .unwrap_or_default();

        let lines = vec![
            Line::from(Span::styled(
                crate::controller::DELETE_QUESTION,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(title, Style::default().fg(Color::White))),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "[y]",
                    Style::default()
                        .fg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" Delete  ", Style::default().fg(Color::White)),
                Span::styled(
                    "[Any other key]",
                    Style::default()
                        .fg(Color::LightYellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" Cancel", Style::default().fg(Color::White)),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Delete Confirmation ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::White))
                    .style(Style::default().bg(Color::DarkGray)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    fn draw_help_overlay(&self, f: &mut Frame) {
        let area = centered_rect(70, 80, f.area());
        f.render_widget(Clear, area);

        let help_text = vec![
            Line::from(Span::styled(
                "PromptVault - Help",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Navigation:"),
            Line::from("  j/k, ↑/↓     - Move up/down"),
            Line::from("  g/G          - Go to top/bottom"),
            Line::from("  Enter        - Open prompt details"),
            Line::from("  Esc/q        - Close details / quit"),
            Line::from(""),
            Line::from("Filters:"),
            Line::from("  /            - Search (Enter to apply)"),
            Line::from("  t/T          - Next/previous tag"),
            Line::from("  Tab          - All Prompts / Favorites"),
            Line::from("  s            - Cycle sort order"),
            Line::from(""),
            Line::from("Actions:"),
            Line::from("  n            - New prompt"),
            Line::from("  e            - Edit prompt"),
            Line::from("  d            - Delete prompt (with confirmation)"),
            Line::from("  f            - Toggle favorite"),
            Line::from("  c            - Copy open prompt to clipboard"),
            Line::from(""),
            Line::from("Form:"),
            Line::from("  Tab          - Next field"),
            Line::from("  Ctrl+S       - Save"),
            Line::from("  Esc          - Cancel"),
            Line::from(""),
            Line::from("Press any key to close help..."),
        ];

        let help_block = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .border_style(Style::default().fg(BORDER))
                    .style(Style::default().bg(Color::Rgb(25, 28, 35))),
            )
            .style(Style::default().fg(TEXT))
            .wrap(Wrap { trim: true });

        f.render_widget(help_block, area);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::fake::FakeClipboard;
    use crate::config::DisplayConfig;
    use crate::library::PromptLibrary;
    use crate::query::ViewTab;
    use crate::storage::Storage;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    fn create_test_tui() -> (VaultTui, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base(temp_dir.path().to_path_buf());
        let controller =
            VaultController::new(PromptLibrary::load(storage), DisplayConfig::default());
        (
            VaultTui::with_clipboard(controller, Box::new(FakeClipboard::default())),
            temp_dir,
        )
    }

    fn press(tui: &mut VaultTui, code: KeyCode) -> bool {
        tui.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(tui: &mut VaultTui, text: &str) {
        for c in text.chars() {
            press(tui, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_starts_on_newest_prompt() {
        let (tui, _temp) = create_test_tui();
        assert_eq!(tui.selected_id().as_deref(), Some("prompt-6"));
    }

    #[test]
    fn test_navigation_and_quit() {
        let (mut tui, _temp) = create_test_tui();
        press(&mut tui, KeyCode::Char('j'));
        assert_eq!(tui.selected_id().as_deref(), Some("prompt-5"));
        press(&mut tui, KeyCode::Char('G'));
        assert_eq!(tui.selected_id().as_deref(), Some("prompt-1"));
        press(&mut tui, KeyCode::Char('j'));
        assert_eq!(tui.selected_id().as_deref(), Some("prompt-1"));
        assert!(press(&mut tui, KeyCode::Char('q')));
    }

    #[test]
    fn test_tab_switches_to_favorites() {
        let (mut tui, _temp) = create_test_tui();
        press(&mut tui, KeyCode::Tab);
        assert_eq!(tui.controller().selection().view, ViewTab::Favorites);
        assert_eq!(tui.controller().visible().len(), 2);
    }

    #[test]
    fn test_search_submits_on_enter() {
        let (mut tui, _temp) = create_test_tui();
        press(&mut tui, KeyCode::Char('/'));
        type_text(&mut tui, "python");
        assert_eq!(tui.controller().visible().len(), 6);

        press(&mut tui, KeyCode::Enter);
        assert_eq!(tui.mode, InputMode::Normal);
        assert_eq!(tui.selected_id().as_deref(), Some("prompt-2"));
    }

    #[test]
    fn test_open_copy_and_close_detail() {
        let (mut tui, _temp) = create_test_tui();
        press(&mut tui, KeyCode::Enter);
        assert!(tui.controller().overlay().is_open());

        press(&mut tui, KeyCode::Char('c'));
        assert_eq!(tui.status().unwrap().message, "Prompt copied to clipboard!");
        assert_eq!(tui.controller().library().get("prompt-6").unwrap().use_count, 16);

        assert!(!press(&mut tui, KeyCode::Char('q')));
        assert!(!tui.controller().overlay().is_open());
    }

    #[test]
    fn test_delete_requires_y() {
        let (mut tui, _temp) = create_test_tui();
        press(&mut tui, KeyCode::Char('d'));
        assert_eq!(tui.mode, InputMode::ConfirmDelete("prompt-6".to_string()));
        press(&mut tui, KeyCode::Char('n'));
        assert_eq!(tui.status().unwrap().message, "Deletion cancelled");
        assert!(tui.controller().library().get("prompt-6").is_some());

        press(&mut tui, KeyCode::Char('d'));
        press(&mut tui, KeyCode::Char('y'));
        assert_eq!(tui.status().unwrap().message, "Prompt deleted successfully!");
        assert!(tui.controller().library().get("prompt-6").is_none());
        assert_eq!(tui.selected_id().as_deref(), Some("prompt-5"));
    }

    #[test]
    fn test_new_prompt_form() {
        let (mut tui, _temp) = create_test_tui();
        press(&mut tui, KeyCode::Char('n'));
        assert_eq!(tui.mode, InputMode::Form);

        tui.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(
            tui.form().unwrap().error.as_deref(),
            Some("Title is required")
        );

        type_text(&mut tui, "Standup");
        press(&mut tui, KeyCode::Tab);
        type_text(&mut tui, "Work, Daily");
        press(&mut tui, KeyCode::Tab);
        type_text(&mut tui, "Summarize my day");
        tui.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        assert_eq!(tui.mode, InputMode::Normal);
        assert_eq!(tui.status().unwrap().message, "Prompt created successfully!");
        let id = tui.selected_id().unwrap();
        let created = tui.controller().library().get(&id).unwrap();
        assert_eq!(created.title, "Standup");
        assert_eq!(created.tags, vec!["Work", "Daily"]);
    }

    #[test]
    fn test_renders_without_panicking() {
        let (mut tui, _temp) = create_test_tui();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| tui.ui(f)).unwrap();

        press(&mut tui, KeyCode::Enter);
        press(&mut tui, KeyCode::Char('?'));
        terminal.draw(|f| tui.ui(f)).unwrap();
    }
}

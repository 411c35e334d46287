//! Interactive form for assembling and running an easyeda2kicad command
//!
//! `FormState` holds the session plus focus and overlay state, and turns key
//! presses into a `FormAction` without touching the terminal, so the whole
//! input model is testable. `run_form` owns the terminal and the event loop.
//! Panes are drawn from `Session::derived` on every frame, so the form does
//! not install an `on_change` hook.

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tracing::{debug, info};

use super::browser::{draw_browser, BrowserAction, DirectoryBrowser};
use crate::command::{
    Executor, FieldId, FieldKind, FieldValue, RunError, Session, TextField,
};
use crate::report::{RunReport, Severity};

/// A focusable row in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormItem {
    Field(FieldId),
    RunButton,
}

/// Popups drawn over the form. Only one is active at a time.
#[derive(Debug, Clone)]
pub enum Overlay {
    None,
    Running,
    Report(RunReport),
    QuitConfirm,
    Browser(DirectoryBrowser),
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Stay,
    Run,
    Quit,
}

#[derive(Debug)]
pub struct FormState {
    session: Session,
    items: Vec<FormItem>,
    focus: usize,
    pub overlay: Overlay,
}

impl FormState {
    pub fn new(session: Session) -> Self {
        let items = FieldId::ALL
            .iter()
            .copied()
            .map(FormItem::Field)
            .chain(std::iter::once(FormItem::RunButton))
            .collect();
        Self {
            session,
            items,
            focus: 0,
            overlay: Overlay::None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn items(&self) -> &[FormItem] {
        &self.items
    }

    pub fn focused(&self) -> FormItem {
        self.items[self.focus]
    }

    pub fn can_run(&self) -> bool {
        self.session.derived().is_valid_to_run()
    }

    fn is_focusable(&self, item: FormItem) -> bool {
        match item {
            FormItem::Field(id) => self.session.derived().is_enabled(id),
            FormItem::RunButton => true,
        }
    }

    pub fn focus_next(&mut self) {
        let len = self.items.len();
        for step in 1..=len {
            let idx = (self.focus + step) % len;
            if self.is_focusable(self.items[idx]) {
                self.focus = idx;
                return;
            }
        }
    }

    pub fn focus_prev(&mut self) {
        let len = self.items.len();
        for step in 1..=len {
            let idx = (self.focus + len - step) % len;
            if self.is_focusable(self.items[idx]) {
                self.focus = idx;
                return;
            }
        }
    }

    /// Move focus off a field that a mutation just disabled
    fn settle_focus(&mut self) {
        if !self.is_focusable(self.focused()) {
            self.focus_next();
        }
    }

    fn focused_text(&self) -> Option<TextField> {
        match self.focused() {
            FormItem::Field(id) => id.as_text(),
            FormItem::RunButton => None,
        }
    }

    fn edit_text(&mut self, field: TextField, edit: impl FnOnce(&mut String)) {
        let mut value = self.session.state().raw_text(field).to_string();
        edit(&mut value);
        self.session.set_text(field, value);
        self.settle_focus();
    }

    fn open_browser(&mut self) {
        let start = DirectoryBrowser::start_dir_for(self.session.state().raw_text(TextField::OutputPath));
        debug!(start = %start.display(), "opening folder browser");
        self.overlay = Overlay::Browser(DirectoryBrowser::new(start));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match &mut self.overlay {
            Overlay::Report(_) => {
                self.overlay = Overlay::None;
                return FormAction::Stay;
            }
            Overlay::Running => return FormAction::Stay,
            Overlay::QuitConfirm => {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => return FormAction::Quit,
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        self.overlay = Overlay::None;
                    }
                    _ => {}
                }
                return FormAction::Stay;
            }
            Overlay::Browser(browser) => {
                match browser.handle_key(key) {
                    BrowserAction::Stay => {}
                    BrowserAction::Selected(path) => {
                        self.overlay = Overlay::None;
                        if !path.as_os_str().is_empty() {
                            self.session
                                .set_text(TextField::OutputPath, path.display().to_string());
                        }
                    }
                    BrowserAction::Cancelled => self.overlay = Overlay::None,
                }
                return FormAction::Stay;
            }
            Overlay::None => {}
        }

        match key.code {
            KeyCode::Esc => {
                self.overlay = Overlay::QuitConfirm;
                FormAction::Stay
            }
            KeyCode::Char('c') if ctrl => {
                self.overlay = Overlay::QuitConfirm;
                FormAction::Stay
            }
            KeyCode::F(5) => FormAction::Run,
            KeyCode::Char('r') if ctrl => FormAction::Run,
            KeyCode::Up | KeyCode::BackTab => {
                self.focus_prev();
                FormAction::Stay
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focus_next();
                FormAction::Stay
            }
            KeyCode::F(2) if self.focused() == FormItem::Field(FieldId::OutputPath) => {
                self.open_browser();
                FormAction::Stay
            }
            KeyCode::Char('o')
                if ctrl && self.focused() == FormItem::Field(FieldId::OutputPath) =>
            {
                self.open_browser();
                FormAction::Stay
            }
            KeyCode::Enter => match self.focused() {
                FormItem::RunButton => FormAction::Run,
                FormItem::Field(id) => {
                    match id.kind() {
                        FieldKind::Text => self.focus_next(),
                        FieldKind::Flag => self.toggle_focused(),
                    }
                    FormAction::Stay
                }
            },
            KeyCode::Char('u') if ctrl => {
                if let Some(field) = self.focused_text() {
                    self.edit_text(field, String::clear);
                }
                FormAction::Stay
            }
            KeyCode::Backspace => {
                if let Some(field) = self.focused_text() {
                    self.edit_text(field, |value| {
                        value.pop();
                    });
                }
                FormAction::Stay
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(field) = self.focused_text() {
                    self.edit_text(field, |value| value.push(c));
                } else if c == ' ' {
                    self.toggle_focused();
                }
                FormAction::Stay
            }
            _ => FormAction::Stay,
        }
    }

    fn toggle_focused(&mut self) {
        if let FormItem::Field(id) = self.focused() {
            if let Some(flag) = id.as_flag() {
                self.session.toggle(flag);
                self.settle_focus();
            }
        }
    }

    /// Run the session's command and put the outcome in a report popup
    pub fn perform_run(&mut self, executor: &Executor) {
        let report = match self.session.run(executor) {
            Ok(report) => report,
            Err(RunError::InputInvalid(issues)) => RunReport::from_issues(&issues),
        };
        info!(title = %report.title, "run finished");
        self.overlay = Overlay::Report(report);
    }
}

// ============================================================================
// Terminal Setup/Teardown
// ============================================================================

/// Setup terminal for TUI rendering with panic-safe cleanup
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        teardown_terminal();
        original_hook(panic_info);
    }));

    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
}

/// Open the form on `session` and block until the user quits
pub fn run_form(session: Session, executor: &Executor) -> Result<()> {
    let mut form = FormState::new(session);

    let mut terminal = setup_terminal()?;
    let result = run_form_loop(&mut terminal, &mut form, executor);
    teardown_terminal();

    result
}

fn run_form_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    form: &mut FormState,
    executor: &Executor,
) -> Result<()> {
    loop {
        terminal.draw(|f| render_form(f, form))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match form.handle_key(key) {
            FormAction::Stay => {}
            FormAction::Quit => return Ok(()),
            FormAction::Run => {
                form.overlay = Overlay::Running;
                terminal.draw(|f| render_form(f, form))?;
                form.perform_run(executor);
                discard_pending_events()?;
            }
        }
    }
}

/// Drop input that queued up while a run was blocking
fn discard_pending_events() -> Result<()> {
    let mut dropped = 0usize;
    while event::poll(Duration::ZERO)? {
        event::read()?;
        dropped += 1;
    }
    if dropped > 0 {
        debug!(dropped, "discarded input received during run");
    }
    Ok(())
}

// ============================================================================
// Rendering
// ============================================================================

/// Create a centered rectangle with fixed dimensions
pub(crate) fn centered_fixed_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Truncate a path string from the start to fit within max_len characters
pub(crate) fn truncate_path_start(path: &str, max_len: usize) -> String {
    let char_count = path.chars().count();
    if char_count <= max_len {
        return path.to_string();
    }
    if max_len <= 3 {
        return "...".to_string();
    }
    let keep = max_len - 3;
    let tail: String = path.chars().skip(char_count - keep).collect();
    format!("...{}", tail)
}

fn render_form(f: &mut Frame, form: &FormState) {
    let derived = form.session.derived();
    let issue_height = if derived.issues.is_empty() {
        3
    } else {
        derived.issues.len() as u16 + 3
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Title
            Constraint::Min(8),               // Fields
            Constraint::Length(issue_height), // Status
            Constraint::Length(4),            // Command
            Constraint::Length(1),            // Help bar
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_fields(f, chunks[1], form);
    render_status(f, chunks[2], form);
    render_command(f, chunks[3], form);
    render_help_bar(f, chunks[4], form);

    match &form.overlay {
        Overlay::None => {}
        Overlay::Running => render_running_overlay(f),
        Overlay::Report(report) => render_report_overlay(f, report),
        Overlay::QuitConfirm => render_quit_confirm_overlay(f),
        Overlay::Browser(browser) => draw_browser(f, browser),
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled("e2k-tui", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            "  EasyEDA / LCSC to KiCad",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, area);
}

fn render_fields(f: &mut Frame, area: Rect, form: &FormState) {
    let derived = form.session.derived();
    let state = form.session.state();
    let focused = form.focused();
    let value_width = (area.width as usize).saturating_sub(24);

    let mut lines = Vec::with_capacity(form.items.len() + 1);
    for &item in &form.items {
        let is_focused = item == focused;
        let marker = if is_focused { "▸ " } else { "  " };

        let line = match item {
            FormItem::Field(id) => {
                let enabled = derived.is_enabled(id);
                let label_style = if !enabled {
                    Style::default().fg(Color::DarkGray)
                } else if is_focused {
                    Style::default().fg(Color::Cyan).bold()
                } else {
                    Style::default().fg(Color::White)
                };
                let value_style = if enabled {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                let mut spans = vec![
                    Span::styled(marker, Style::default().fg(Color::Cyan)),
                    Span::styled(format!("{:<18}", id.label()), label_style),
                ];
                match state.get(id) {
                    FieldValue::Text(value) => {
                        let shown = if id == FieldId::OutputPath {
                            truncate_path_start(&value, value_width)
                        } else {
                            value
                        };
                        spans.push(Span::styled(shown, value_style));
                        if is_focused {
                            spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
                        }
                    }
                    FieldValue::Flag(on) => {
                        let mark = if on { "[x]" } else { "[ ]" };
                        spans.push(Span::styled(mark, value_style));
                    }
                }
                Line::from(spans)
            }
            FormItem::RunButton => {
                let style = match (form.can_run(), is_focused) {
                    (true, true) => Style::default().fg(Color::Black).bg(Color::Green).bold(),
                    (true, false) => Style::default().fg(Color::Green).bold(),
                    (false, true) => Style::default().fg(Color::Black).bg(Color::DarkGray),
                    (false, false) => Style::default().fg(Color::DarkGray),
                };
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Cyan)),
                    Span::styled("[ Run ]", style),
                ])
            }
        };

        if item == FormItem::RunButton {
            lines.push(Line::from(""));
        }
        lines.push(line);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Options ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(f: &mut Frame, area: Rect, form: &FormState) {
    let issues = &form.session.derived().issues;

    let (lines, color) = if issues.is_empty() {
        (
            vec![Line::from(Span::styled(
                "Ready to run",
                Style::default().fg(Color::Green),
            ))],
            Color::Green,
        )
    } else {
        let mut lines = vec![Line::from(Span::styled(
            "Cannot run due to the following errors:",
            Style::default().fg(Color::Red).bold(),
        ))];
        lines.extend(issues.iter().map(|issue| {
            Line::from(Span::styled(
                format!("- {}", issue),
                Style::default().fg(Color::Red),
            ))
        }));
        (lines, Color::Red)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(" Status ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_command(f: &mut Frame, area: Rect, form: &FormState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Command ");
    let paragraph = Paragraph::new(form.session.command().display().to_string())
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(paragraph, area);
}

/// Render help bar with context-appropriate shortcuts
fn render_help_bar(f: &mut Frame, area: Rect, form: &FormState) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
    let hint = |h: &'static str| Span::styled(h, Style::default().fg(Color::DarkGray));

    let mut spans = vec![key("  ↑↓/Tab"), hint(" move  ")];

    match form.focused() {
        FormItem::Field(id) if id.kind() == FieldKind::Text => {
            spans.push(key("Type"));
            spans.push(hint(" edit  "));
            spans.push(key("^U"));
            spans.push(hint(" clear  "));
            if id == FieldId::OutputPath {
                spans.push(key("F2"));
                spans.push(hint(" browse  "));
            }
        }
        FormItem::Field(_) => {
            spans.push(key("Space"));
            spans.push(hint(" toggle  "));
        }
        FormItem::RunButton => {
            spans.push(key("Enter"));
            spans.push(hint(" run  "));
        }
    }

    spans.push(key("F5"));
    spans.push(hint(" run  "));
    spans.push(key("Esc"));
    spans.push(hint(" quit"));

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_running_overlay(f: &mut Frame) {
    let popup = centered_fixed_rect(40, 5, f.area());
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Running ")
        .title_style(Style::default().fg(Color::Yellow).bold());

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Converting with easyeda2kicad...",
            Style::default().fg(Color::White),
        )),
    ])
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(paragraph, popup);
}

fn render_report_overlay(f: &mut Frame, report: &RunReport) {
    let color = match report.severity {
        Severity::Info => Color::Green,
        Severity::Error => Color::Red,
    };
    let message_lines = report.message.lines().count() as u16;
    let popup = centered_fixed_rect(70, (message_lines + 6).clamp(8, 20), f.area());
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", report.title))
        .title_style(Style::default().fg(color).bold())
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut content: Vec<Line> = vec![Line::from("")];
    content.extend(
        report
            .message
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(Color::White)))),
    );
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "Press any key to continue",
        Style::default().fg(Color::DarkGray).italic(),
    )));

    let paragraph = Paragraph::new(content).wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner);
}

/// Render quit confirmation overlay
fn render_quit_confirm_overlay(f: &mut Frame) {
    let popup = centered_fixed_rect(40, 8, f.area());
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Quit? ")
        .title_style(Style::default().fg(Color::Red).bold())
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Are you sure you want to quit?",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("      ", Style::default()),
            Span::styled("Y", Style::default().fg(Color::Cyan)),
            Span::styled(" yes  ", Style::default().fg(Color::DarkGray)),
            Span::styled("N", Style::default().fg(Color::Cyan)),
            Span::styled(" no", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    f.render_widget(Paragraph::new(content), inner);
}

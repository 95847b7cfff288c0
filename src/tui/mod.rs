// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Single-threaded, event-driven shell (ratatui + crossterm). All controller operations are
//! synchronous; assistant dispatch goes through the [`crate::dispatch`] channels and while a
//! request is pending further submission is refused, so at most one request is in flight per
//! session. Replies for a replaced session (stale generation) are dropped.

use std::{
    error::Error,
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::assistant::SessionHandle;
use crate::context::ConversationContextManager;
use crate::dispatch::{WorkerEvent, WorkerRequest};
use crate::model::{DocumentSet, Role};
use crate::prompt::{self, DependencyInfo};
use crate::source;
use crate::viewport::{PointerPoint, ViewportController, WheelDirection};

pub mod surface;
pub mod theme;

#[cfg(test)]
mod tests;

pub use theme::{ThemeError, TuiTheme};

use surface::DiagramSurface;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const TOAST_TTL: Duration = Duration::from_secs(4);
const KEY_PAN_STEP: f64 = 2.0;
const FOOTER_BRAND: &str = "🅖 🅐 🅛 🅐 🅣 🅔 🅐 ";

/// Where the active document set came from; reloads re-query the same origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOrigin {
    Demo,
    Dir(PathBuf),
}

impl DocumentOrigin {
    fn label(&self) -> String {
        match self {
            Self::Demo => "demo project".to_owned(),
            Self::Dir(dir) => dir.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Chat,
    Diagram,
    Dependencies,
}

impl Tab {
    fn next(self) -> Self {
        match self {
            Self::Chat => Self::Diagram,
            Self::Diagram => Self::Dependencies,
            Self::Dependencies => Self::Chat,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Chat => Self::Dependencies,
            Self::Diagram => Self::Chat,
            Self::Dependencies => Self::Diagram,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InFlight {
    Chat,
    Diagram,
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

pub struct App {
    documents: DocumentSet,
    origin: DocumentOrigin,
    context: ConversationContextManager,
    session_handle: SessionHandle,
    generation: u64,
    viewport: ViewportController<DiagramSurface>,
    dependencies: Vec<DependencyInfo>,
    tab: Tab,
    input: String,
    in_flight: Option<InFlight>,
    theme: TuiTheme,
    toast: Option<Toast>,
    diagram_area: Option<Rect>,
    requests: UnboundedSender<WorkerRequest>,
    events: UnboundedReceiver<WorkerEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(
        documents: DocumentSet,
        origin: DocumentOrigin,
        theme: TuiTheme,
        requests: UnboundedSender<WorkerRequest>,
        events: UnboundedReceiver<WorkerEvent>,
    ) -> Self {
        let mut app = Self {
            documents: DocumentSet::default(),
            origin,
            context: ConversationContextManager::new(),
            session_handle: SessionHandle::new(0),
            generation: 0,
            viewport: ViewportController::new(),
            dependencies: Vec::new(),
            tab: Tab::Chat,
            input: String::new(),
            in_flight: None,
            theme,
            toast: None,
            diagram_area: None,
            requests,
            events,
            should_quit: false,
        };
        app.replace_documents(documents);
        app
    }

    /// Swaps in a whole new document set and recreates the conversation session, so stale
    /// context can never survive the swap. Any in-flight reply becomes stale by generation.
    fn replace_documents(&mut self, documents: DocumentSet) {
        self.documents = documents;
        self.context.start_session();
        self.session_handle = self.session_handle.next();
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = None;
        self.dependencies.clear();
        self.viewport.detach();
        self.context.record_exchange(
            Role::Assistant,
            format!(
                "Loaded {} file(s) from {}. What would you like to analyze?",
                self.documents.len(),
                self.origin.label()
            ),
        );
    }

    fn reload_documents(&mut self) {
        let loaded = match &self.origin {
            DocumentOrigin::Demo => Ok(source::demo_documents()),
            DocumentOrigin::Dir(dir) => source::load_dir(dir),
        };
        match loaded {
            Ok(documents) => {
                let count = documents.len();
                self.replace_documents(documents);
                self.set_toast(format!("Reloaded {count} file(s)"));
            }
            Err(err) => self.set_toast(format!("Reload failed: {err}")),
        }
    }

    fn set_toast(&mut self, message: String) {
        self.toast = Some(Toast { message, expires_at: Instant::now() + TOAST_TTL });
    }

    fn active_toast(&mut self) -> Option<String> {
        if let Some(toast) = &self.toast {
            if toast.expires_at <= Instant::now() {
                self.toast = None;
            }
        }
        self.toast.as_ref().map(|toast| toast.message.clone())
    }

    fn submit_message(&mut self) {
        if self.in_flight.is_some() {
            self.set_toast("The assistant is still responding".to_owned());
            return;
        }
        if self.documents.is_empty() {
            self.set_toast("Load some files first".to_owned());
            return;
        }

        let text = self.input.trim().to_owned();
        let cached = self.context.session().cached_diagram_source().map(str::to_owned);
        match self.context.prepare_outgoing_message(&text, &self.documents, cached.as_deref()) {
            Ok(payload) => {
                self.context.record_exchange(Role::User, text);
                self.input.clear();
                self.in_flight = Some(InFlight::Chat);
                let _ = self.requests.send(WorkerRequest::Chat {
                    generation: self.generation,
                    handle: self.session_handle,
                    payload,
                });
            }
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    fn generate_diagram(&mut self) {
        if self.in_flight.is_some() {
            self.set_toast("The assistant is still responding".to_owned());
            return;
        }
        if self.documents.is_empty() {
            self.set_toast("Load some files before generating a graph".to_owned());
            return;
        }

        self.tab = Tab::Diagram;
        self.in_flight = Some(InFlight::Diagram);
        let _ = self.requests.send(WorkerRequest::Diagram {
            generation: self.generation,
            diagram_prompt: prompt::diagram_prompt(&self.documents),
            dependency_prompt: prompt::dependency_prompt(&self.documents),
        });
    }

    fn drain_worker_events(&mut self) {
        while let Ok(worker_event) = self.events.try_recv() {
            if worker_event.generation() != self.generation {
                // Reply for a replaced session; ignore it.
                continue;
            }
            self.in_flight = None;

            match worker_event {
                WorkerEvent::ChatReply { result, .. } => match result {
                    Ok(reply) => self.context.record_exchange(Role::Assistant, reply),
                    Err(err) => self.set_toast(err.to_string()),
                },
                WorkerEvent::DiagramReady { graph, dependencies, .. } => {
                    match graph {
                        Ok(reply) => match prompt::extract_mermaid_block(&reply) {
                            Some(diagram_source) => self.install_diagram(diagram_source),
                            None => self.set_toast(
                                "The assistant reply contained no mermaid block".to_owned(),
                            ),
                        },
                        Err(err) => self.set_toast(err.to_string()),
                    }
                    match dependencies {
                        Ok(report) => match prompt::parse_dependency_report(&report) {
                            Ok(entries) => self.dependencies = entries,
                            Err(err) => {
                                self.set_toast(format!("Unreadable dependency report: {err}"));
                            }
                        },
                        Err(err) => self.set_toast(err.to_string()),
                    }
                }
            }
        }
    }

    fn install_diagram(&mut self, diagram_source: String) {
        self.context.note_diagram_generated(diagram_source.clone());
        if let Err(err) = self.viewport.attach(DiagramSurface::from_source(&diagram_source)) {
            self.set_toast(err.to_string());
        }
    }

    fn nudge_viewport(&mut self, dx: f64, dy: f64) {
        if self.viewport.is_panning() {
            return;
        }
        self.viewport.begin_pan(PointerPoint::default());
        self.viewport.update_pan(PointerPoint::new(dx, dy));
        self.viewport.end_pan();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('g') => self.generate_diagram(),
                KeyCode::Char('t') => self.theme.toggle(),
                KeyCode::Char('r') => self.reload_documents(),
                _ => {}
            }
            return;
        }

        match self.tab {
            Tab::Chat => self.handle_chat_key(key.code),
            Tab::Diagram | Tab::Dependencies => self.handle_view_key(key.code),
        }
    }

    fn handle_chat_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.submit_message(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Esc => self.input.clear(),
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.prev(),
            KeyCode::Char(ch) => self.input.push(ch),
            _ => {}
        }
    }

    fn handle_view_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.tab = Tab::Chat,
            KeyCode::Char('2') => self.tab = Tab::Diagram,
            KeyCode::Char('3') => self.tab = Tab::Dependencies,
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.prev(),
            KeyCode::Char('g') => self.generate_diagram(),
            KeyCode::Char('t') => self.theme.toggle(),
            KeyCode::Char('r') => self.reload_documents(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.viewport.zoom_in(),
            KeyCode::Char('-') => self.viewport.zoom_out(),
            KeyCode::Char('0') => self.viewport.reset(),
            KeyCode::Up => self.nudge_viewport(0.0, KEY_PAN_STEP),
            KeyCode::Down => self.nudge_viewport(0.0, -KEY_PAN_STEP),
            KeyCode::Left => self.nudge_viewport(KEY_PAN_STEP, 0.0),
            KeyCode::Right => self.nudge_viewport(-KEY_PAN_STEP, 0.0),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let point = PointerPoint::new(f64::from(mouse.column), f64::from(mouse.row));
        let inside = self.tab == Tab::Diagram
            && self
                .diagram_area
                .is_some_and(|area| area_contains(area, mouse.column, mouse.row));

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => self.viewport.begin_pan(point),
            MouseEventKind::Drag(MouseButton::Left) => {
                if inside {
                    self.viewport.update_pan(point);
                } else {
                    // Pointer left the tracked surface; never leave a pan stuck.
                    self.viewport.end_pan();
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.viewport.end_pan(),
            MouseEventKind::Moved if !inside => self.viewport.end_pan(),
            MouseEventKind::ScrollUp if inside => self.viewport.zoom_at_wheel(WheelDirection::Up),
            MouseEventKind::ScrollDown if inside => {
                self.viewport.zoom_at_wheel(WheelDirection::Down);
            }
            _ => {}
        }
    }
}

fn area_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Runs the interactive terminal UI until the user quits.
pub fn run(mut app: App) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;

    while !app.should_quit {
        app.drain_worker_events();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let base = app.theme.base_style();
    frame.render_widget(Block::default().style(base), frame.size());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)])
        .split(frame.size());

    draw_tabs(frame, app, rows[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(20)])
        .split(rows[1]);
    draw_file_list(frame, app, panes[0]);

    match app.tab {
        Tab::Chat => draw_chat(frame, app, panes[1]),
        Tab::Diagram => draw_diagram(frame, app, panes[1]),
        Tab::Dependencies => draw_dependencies(frame, app, panes[1]),
    }
    if app.tab != Tab::Diagram {
        app.diagram_area = None;
    }

    draw_footer(frame, app, rows[2]);
}

fn draw_tabs(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let tabs = [(Tab::Chat, "1 Chat"), (Tab::Diagram, "2 Diagram"), (Tab::Dependencies, "3 Dependencies")];
    let mut spans = Vec::new();
    for (tab, label) in tabs {
        spans.push(Span::styled(format!(" {label} "), app.theme.tab_style(app.tab == tab)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_file_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.panel_border_style(false))
        .title(format!("Files ({})", app.documents.len()));

    let items: Vec<ListItem> = app
        .documents
        .paths()
        .map(|path| ListItem::new(path.to_owned()))
        .collect();
    frame.render_widget(List::new(items).block(block).style(app.theme.base_style()), area);
}

fn draw_chat(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let transcript_block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.panel_border_style(false))
        .title("Chat");
    let inner = transcript_block.inner(sections[0]);

    let mut lines: Vec<Line> = Vec::new();
    for exchange in app.context.session().transcript() {
        let (prefix, style) = match exchange.role() {
            Role::User => ("You: ", app.theme.user_style()),
            Role::Assistant => ("Assistant: ", app.theme.assistant_style()),
        };
        for (idx, wrapped) in
            wrap_text(exchange.text(), usize::from(inner.width).saturating_sub(prefix.len()))
                .into_iter()
                .enumerate()
        {
            let lead = if idx == 0 { prefix } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(lead.to_owned(), style.add_modifier(Modifier::BOLD)),
                Span::styled(wrapped, style),
            ]));
        }
    }
    if app.in_flight == Some(InFlight::Chat) {
        lines.push(Line::from(Span::styled("Assistant: Thinking...", app.theme.busy_style())));
    }

    let skip = lines.len().saturating_sub(usize::from(inner.height)) as u16;
    frame.render_widget(
        Paragraph::new(lines)
            .block(transcript_block)
            .style(app.theme.base_style())
            .scroll((skip, 0)),
        sections[0],
    );

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.panel_border_style(true))
        .title("Message");
    let input_inner = input_block.inner(sections[1]);
    frame.render_widget(
        Paragraph::new(format!("> {}", app.input))
            .block(input_block)
            .style(app.theme.base_style()),
        sections[1],
    );
    let cursor_x = input_inner.x + 2 + app.input.chars().count() as u16;
    frame.set_cursor(cursor_x.min(input_inner.right().saturating_sub(1)), input_inner.y);
}

fn draw_diagram(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let title = format!("Diagram ({:.0}%)", app.viewport.transform().scale() * 100.0);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.panel_border_style(true))
        .title(title);
    let inner = block.inner(area);
    app.diagram_area = Some(inner);

    let body: Vec<Line> = match app.viewport.surface() {
        Some(surface) => surface
            .visible_lines(inner.width, inner.height)
            .into_iter()
            .map(Line::from)
            .collect(),
        None if app.in_flight == Some(InFlight::Diagram) => {
            vec![Line::from(Span::styled(
                "The assistant is building the graph...",
                app.theme.busy_style(),
            ))]
        }
        None => vec![Line::from("No diagram yet. Press g to generate one.")],
    };

    frame.render_widget(Paragraph::new(body).block(block).style(app.theme.base_style()), area);
}

fn draw_dependencies(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.panel_border_style(true))
        .title(format!("Dependencies ({})", app.dependencies.len()));

    if app.dependencies.is_empty() {
        let message = if app.in_flight == Some(InFlight::Diagram) {
            "The assistant is analyzing dependencies..."
        } else {
            "No dependency report yet. Press g to generate one."
        };
        frame.render_widget(
            Paragraph::new(message).block(block).style(app.theme.base_style()),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = app
        .dependencies
        .iter()
        .map(|dependency| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        dependency.name.clone(),
                        app.theme.base_style().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(dependency.version.clone(), app.theme.hint_label_style()),
                ]),
                Line::from(Span::styled(
                    format!("  {}", dependency.description),
                    app.theme.hint_label_style(),
                )),
            ])
        })
        .collect();
    frame.render_widget(List::new(items).block(block).style(app.theme.base_style()), area);
}

fn draw_footer(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    if let Some(message) = app.active_toast() {
        frame.render_widget(
            Paragraph::new(Span::styled(message, app.theme.error_style())),
            area,
        );
        return;
    }

    let hints: &[(&str, &str)] = match app.tab {
        Tab::Chat => &[
            ("Enter", "send"),
            ("Tab", "panel"),
            ("^G", "graph"),
            ("^R", "reload"),
            ("^T", "theme"),
            ("^C", "quit"),
        ],
        Tab::Diagram => &[
            ("drag", "pan"),
            ("wheel/+/-", "zoom"),
            ("0", "reset"),
            ("g", "graph"),
            ("t", "theme"),
            ("q", "quit"),
        ],
        Tab::Dependencies => &[("g", "regen"), ("1", "chat"), ("t", "theme"), ("q", "quit")],
    };

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled((*key).to_owned(), app.theme.hint_key_style()));
        spans.push(Span::styled(format!(" {label}  "), app.theme.hint_label_style()));
    }
    spans.push(Span::styled(FOOTER_BRAND, app.theme.hint_label_style()));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Splits `text` into display lines no wider than `width`, honoring embedded newlines.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut wrapped = Vec::new();
    for raw_line in text.lines() {
        if raw_line.is_empty() {
            wrapped.push(String::new());
            continue;
        }
        let mut current = String::new();
        let mut count = 0;
        for ch in raw_line.chars() {
            if count == width {
                wrapped.push(std::mem::take(&mut current));
                count = 0;
            }
            current.push(ch);
            count += 1;
        }
        if !current.is_empty() {
            wrapped.push(current);
        }
    }
    if wrapped.is_empty() {
        wrapped.push(String::new());
    }
    wrapped
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Keyhint and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Hosts a [`SelectionSession`] over a grid of demo buttons (ratatui + crossterm): it decodes
//! terminal events into session keys, draws hint markers over the buttons in view, and applies
//! activations.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
    },
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::config::HintSettings;
use crate::session::{HintMatch, Key, SelectionSession, SessionEvent};

mod theme;

use theme::TuiTheme;

pub const DEFAULT_TARGET_COUNT: usize = 24;

const BUTTON_WIDTH: u16 = 18;
const BUTTON_HEIGHT: u16 = 4;
const BUTTON_GAP: u16 = 1;
const TOAST_TTL: Duration = Duration::from_secs(2);
const TITLE: &str = " keyhint ";

/// Runs the interactive terminal UI with `target_count` demo buttons.
pub fn run(settings: &HintSettings, target_count: usize) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(settings, demo_buttons(target_count), theme);
    tracing::info!(targets = target_count, alphabet = %app.session.alphabet(), "tui started");

    while !app.should_quit {
        app.expire_toast(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    app.handle_pointer_or_focus_loss();
                }
                Event::FocusLost => app.handle_pointer_or_focus_loss(),
                Event::Resize(width, height) => app.set_viewport(Rect::new(0, 0, width, height)),
                _ => {}
            }
        }

        if let Some(text) = app.take_clipboard() {
            if let Err(err) = copy_to_clipboard(&text) {
                app.set_toast(format!("Clipboard error: {err}"));
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    app.set_viewport(area);

    frame.render_widget(Block::default().borders(Borders::ALL).title(TITLE), main_area(area));

    let rects = button_rects(grid_area(area), app.buttons.len());
    for (button, rect) in app.buttons.iter().zip(&rects) {
        let Some(rect) = rect else {
            continue;
        };
        let body = Paragraph::new(vec![
            Line::from(button.caption.clone()),
            Line::from(format!("pressed {}", button.presses)),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.button_border_style(button.presses > 0)),
        );
        frame.render_widget(body, *rect);
    }

    for hint in &app.hints {
        let Some(rect) = app
            .hint_targets
            .get(hint.index)
            .and_then(|&button| rects.get(button).copied().flatten())
        else {
            continue;
        };
        let line = marker_line(hint, app.uppercase_markers, &app.theme);
        let width = u16::try_from(line.width()).unwrap_or(u16::MAX).min(rect.width);
        let marker_area = Rect::new(rect.x, rect.y, width, 1);
        frame.render_widget(Clear, marker_area);
        frame.render_widget(Paragraph::new(line), marker_area);
    }

    frame.render_widget(Paragraph::new(footer_line(app)), footer_area(area));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HintKind {
    Press,
    Yank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DemoButton {
    caption: String,
    presses: u32,
}

fn demo_buttons(count: usize) -> Vec<DemoButton> {
    (1..=count).map(|n| DemoButton { caption: format!("Button {n}"), presses: 0 }).collect()
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    session: SelectionSession<usize>,
    hint_kind: HintKind,
    /// Visible markers, as last reported by the session.
    hints: Vec<HintMatch>,
    /// Button index for each labelled target, in the order handed to the session.
    hint_targets: Vec<usize>,
    buttons: Vec<DemoButton>,
    viewport: Rect,
    uppercase_markers: bool,
    theme: TuiTheme,
    toast: Option<Toast>,
    pending_clipboard: Option<String>,
    should_quit: bool,
}

impl App {
    fn new(settings: &HintSettings, buttons: Vec<DemoButton>, theme: TuiTheme) -> Self {
        Self {
            session: SelectionSession::new(settings.alphabet()),
            hint_kind: HintKind::Press,
            hints: Vec::new(),
            hint_targets: Vec::new(),
            buttons,
            viewport: Rect::default(),
            uppercase_markers: settings.uppercase_markers,
            theme,
            toast: None,
            pending_clipboard: None,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.session.is_active() {
            self.handle_hint_key(key);
        } else {
            self.handle_browse_key(key);
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        if is_interrupt(key) {
            self.should_quit = true;
            return;
        }

        if let Some(kind) = hint_kind_for(key) {
            self.enter_hint_mode(kind);
            return;
        }

        match key.code {
            KeyCode::Char('r') => {
                for button in &mut self.buttons {
                    button.presses = 0;
                }
                self.set_toast("Counters reset");
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_hint_key(&mut self, key: KeyEvent) {
        match self.session.handle_key(decode_hint_key(key)) {
            Ok(SessionEvent::FilterUpdate(hints)) => self.hints = hints,
            Ok(SessionEvent::Activated(button)) => {
                self.clear_hints();
                self.activate_button(button);
            }
            Ok(SessionEvent::Cancelled) => self.clear_hints(),
            Ok(SessionEvent::NotConsumed) => {
                if is_interrupt(key) {
                    self.should_quit = true;
                } else if let Some(kind) = hint_kind_for(key) {
                    self.reshow_hints(kind);
                }
            }
            Err(err) => {
                tracing::warn!("hint key rejected: {err}");
                self.clear_hints();
            }
        }
    }

    fn enter_hint_mode(&mut self, kind: HintKind) {
        let targets = self.hint_targets_in_view();
        if targets.is_empty() {
            self.set_toast("No hint targets in view");
            return;
        }

        match self.session.start(targets.clone()) {
            Ok(hints) => {
                self.hint_kind = kind;
                self.hint_targets = targets;
                self.hints = hints;
            }
            Err(err) => self.set_toast(format!("Hint mode unavailable: {err}")),
        }
    }

    /// Tears down the active session and labels the targets in view again.
    fn reshow_hints(&mut self, kind: HintKind) {
        match self.session.handle_key(Key::Cancel) {
            Ok(_) => self.clear_hints(),
            Err(err) => tracing::warn!("hint re-show cancel rejected: {err}"),
        }
        tracing::debug!(kind = ?kind, "hint markers re-shown");
        self.enter_hint_mode(kind);
    }

    fn hint_targets_in_view(&self) -> Vec<usize> {
        button_rects(grid_area(self.viewport), self.buttons.len())
            .iter()
            .enumerate()
            .filter_map(|(idx, rect)| rect.map(|_| idx))
            .collect()
    }

    /// Relabels an active session when the layout changes under it.
    fn set_viewport(&mut self, viewport: Rect) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        if !self.session.is_active() {
            return;
        }

        let targets = self.hint_targets_in_view();
        match self.session.invalidate(targets.clone()) {
            Ok(hints) => {
                self.hint_targets = targets;
                self.hints = hints;
            }
            Err(err) => tracing::warn!("hint relabel failed: {err}"),
        }
    }

    fn handle_pointer_or_focus_loss(&mut self) {
        if !self.session.is_active() {
            return;
        }
        if let Ok(SessionEvent::Cancelled) = self.session.handle_pointer_or_focus_loss() {
            self.clear_hints();
        }
    }

    fn clear_hints(&mut self) {
        self.hints.clear();
        self.hint_targets.clear();
    }

    fn activate_button(&mut self, idx: usize) {
        let Some(button) = self.buttons.get_mut(idx) else {
            return;
        };
        tracing::info!(button = idx, kind = ?self.hint_kind, "hint activated");

        match self.hint_kind {
            HintKind::Press => {
                button.presses = button.presses.saturating_add(1);
                let message = format!("Pressed {}", button.caption);
                self.set_toast(message);
            }
            HintKind::Yank => {
                let caption = button.caption.clone();
                self.set_toast(format!("Yanked {caption}"));
                self.pending_clipboard = Some(caption);
            }
        }
    }

    fn take_clipboard(&mut self) -> Option<String> {
        self.pending_clipboard.take()
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_TTL });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
        }
    }
}

fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn hint_kind_for(key: KeyEvent) -> Option<HintKind> {
    match decode_hint_key(key) {
        Key::Char('f') => Some(HintKind::Press),
        Key::Char('y') => Some(HintKind::Yank),
        _ => None,
    }
}

fn decode_hint_key(key: KeyEvent) -> Key {
    match key.code {
        KeyCode::Backspace => Key::Erase,
        KeyCode::Esc => Key::Cancel,
        KeyCode::Char(ch)
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Key::Char(ch)
        }
        _ => Key::Other,
    }
}

fn main_area(viewport: Rect) -> Rect {
    Rect { height: viewport.height.saturating_sub(1), ..viewport }
}

fn footer_area(viewport: Rect) -> Rect {
    Rect {
        y: viewport.y.saturating_add(viewport.height.saturating_sub(1)),
        height: viewport.height.min(1),
        ..viewport
    }
}

fn grid_area(viewport: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(main_area(viewport))
}

/// Row-major button placement; buttons that do not fit entirely inside `area` get `None`.
fn button_rects(area: Rect, count: usize) -> Vec<Option<Rect>> {
    let step_x = usize::from(BUTTON_WIDTH + BUTTON_GAP);
    let columns = (usize::from(area.width) + usize::from(BUTTON_GAP)) / step_x;
    let columns = columns.max(1);
    let right = usize::from(area.right());
    let bottom = usize::from(area.bottom());

    (0..count)
        .map(|idx| {
            let x = usize::from(area.x) + (idx % columns) * step_x;
            let y = usize::from(area.y) + (idx / columns) * usize::from(BUTTON_HEIGHT);
            let fits = x + usize::from(BUTTON_WIDTH) <= right
                && y + usize::from(BUTTON_HEIGHT) <= bottom;
            fits.then(|| Rect::new(x as u16, y as u16, BUTTON_WIDTH, BUTTON_HEIGHT))
        })
        .collect()
}

fn marker_line(hint: &HintMatch, uppercase: bool, theme: &TuiTheme) -> Line<'static> {
    let (typed, rest) = hint.split();
    let display = |part: &str| if uppercase { part.to_uppercase() } else { part.to_owned() };
    Line::from(vec![
        Span::styled(display(typed), theme.marker_typed_style()),
        Span::styled(display(rest), theme.marker_style()),
    ])
}

fn footer_line(app: &App) -> Line<'static> {
    if let Some(toast) = &app.toast {
        return Line::from(toast.message.clone());
    }

    if let Some(input) = app.session.input() {
        let input = if app.uppercase_markers { input.to_uppercase() } else { input.to_owned() };
        let action = match app.hint_kind {
            HintKind::Press => "press",
            HintKind::Yank => "yank",
        };
        return Line::from(vec![
            Span::styled(format!("{action}: "), app.theme.footer_label_style()),
            Span::styled(format!("{input}_"), app.theme.input_style()),
            Span::styled("  Backspace", app.theme.footer_key_style()),
            Span::styled(" erase  ", app.theme.footer_label_style()),
            Span::styled("Esc", app.theme.footer_key_style()),
            Span::styled(" cancel", app.theme.footer_label_style()),
        ]);
    }

    let mut spans = Vec::new();
    for (key, label) in [("f", "press"), ("y", "yank"), ("r", "reset"), ("q", "quit")] {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key, app.theme.footer_key_style()));
        spans.push(Span::styled(format!(" {label}"), app.theme.footer_label_style()));
    }
    Line::from(spans)
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange).map_err(
            |err| {
                teardown_terminal();
                err
            },
        )?;

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
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableFocusChange, DisableMouseCapture, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text)))
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

/*
[INPUT]:  Store handle, confirmation prompt requests, log buffer, shutdown token
[OUTPUT]: Ratatui-based TUI run loop, rendering, and log buffer utilities
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
[UPDATE]: 2026-10-10 Redraw on store changes and surface timeout prompts as a modal
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::fmt::MakeWriter;

use todo_timer_editor::prompt::PromptRequest;
use todo_timer_editor::store::{AppState, Store};

use super::app::{Focus, Tab, TuiApp};
use super::events::handle_key_event;
use super::terminal::TerminalGuard;
use super::ui::*;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub(crate) const LOG_BUFFER_CAPACITY: usize = 2000;

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn handle(capacity: usize) -> LogBufferHandle {
        Arc::new(StdMutex::new(Self::new(capacity)))
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Last `count` lines, oldest first.
    pub fn tail(&self, count: usize) -> Vec<String> {
        let start = self.lines.len().saturating_sub(count);
        self.lines.iter().skip(start).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl LogWriter {
    fn push(&self, line: String) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_line(line);
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial.drain(..=pos);
            self.push(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            self.push(line);
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

enum UiEvent {
    Input(CrosstermEvent),
}

/// Run the TUI until the user quits or `shutdown` fires.
pub async fn run_tui(
    store: Store,
    mut prompts: mpsc::UnboundedReceiver<PromptRequest>,
    log_buffer: LogBufferHandle,
    shutdown: CancellationToken,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    if event_tx.send(UiEvent::Input(event)).is_err() {
                        break;
                    }
                }
            }
        }
    });

    let mut state_rx = store.watch();
    let mut app = TuiApp::new(store, log_buffer);
    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;
    info!("tui started");

    while !should_quit {
        tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("tui shutdown requested");
                should_quit = true;
            }
            _ = tick.tick() => {}
            Ok(()) = state_rx.changed() => {
                app.on_state_change();
            }
            Some(request) = prompts.recv() => {
                app.offer_prompt(request);
            }
            Some(event) = event_rx.recv() => {
                if let UiEvent::Input(CrosstermEvent::Key(key)) = event {
                    should_quit = handle_key_event(&mut app, key);
                }
            }
        }

        let state = app.store.snapshot();
        terminal.draw(|frame| draw_ui(frame, &mut app, &state))?;
    }

    app.dismiss_prompt();
    input_shutdown.cancel();
    info!("tui stopped");
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &mut TuiApp, state: &AppState) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(area);

    draw_tabs(frame, layout[0], app.current_tab);
    draw_entry(frame, layout[1], app);
    draw_toolbar(frame, layout[2], state);

    match app.current_tab {
        Tab::List => draw_todo_list(frame, layout[3], app, state),
        Tab::Logs => draw_logs(frame, layout[3], &app.log_buffer),
    }

    draw_footer(frame, layout[4], app);

    if let Some(request) = app.pending_prompt.as_ref() {
        let modal_area = centered_rect(area, 50, 30);
        draw_confirm(frame, modal_area, &request.message);
    }
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &TuiApp) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let line1 = match app.focus {
        Focus::Entry => Line::from(vec![
            Span::styled("[Enter]", key_style),
            Span::raw(" Add  "),
            Span::styled("[Esc]", key_style),
            Span::raw(" List  "),
            Span::styled("[Tab]", key_style),
            Span::raw(" Switch tab"),
        ]),
        Focus::List => Line::from(vec![
            Span::styled("[Up/Down]", key_style),
            Span::raw(" Select  "),
            Span::styled("[Space]", key_style),
            Span::raw(" Toggle  "),
            Span::styled("[d]", key_style),
            Span::raw(" Delete  "),
            Span::styled("[c]", key_style),
            Span::raw(" Clear done  "),
            Span::styled("[1/2/3]", key_style),
            Span::raw(" Filter  "),
            Span::styled("[i]", key_style),
            Span::raw(" Edit"),
        ]),
    };
    let line2 = Line::from(vec![
        Span::styled("[t]", key_style),
        Span::raw(" Timer mode  "),
        Span::styled("[r]", key_style),
        Span::raw(" Load sample  "),
        Span::styled("[q]", key_style),
        Span::raw(" Quit  "),
        Span::raw(format!("Status: {}", app.status_message)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let text = Text::from(vec![line1, line2]);
    let widget = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_buffer_drops_oldest_at_capacity() {
        let mut buffer = LogBuffer::new(2);
        buffer.push_line("a".to_string());
        buffer.push_line("b".to_string());
        buffer.push_line("c".to_string());
        assert_eq!(buffer.tail(10), vec!["b", "c"]);
        assert_eq!(buffer.tail(1), vec!["c"]);
    }

    #[test]
    fn zero_capacity_buffer_stays_empty() {
        let mut buffer = LogBuffer::new(0);
        buffer.push_line("ignored".to_string());
        assert!(buffer.is_empty());
    }

    #[test]
    fn writer_splits_lines_and_flushes_partial() {
        let buffer = LogBuffer::handle(10);
        let factory = LogWriterFactory::new(buffer.clone());
        {
            let mut writer = factory.make_writer();
            writer.write_all(b"first\r\nsec").expect("write");
            writer.write_all(b"ond\npartial").expect("write");
        }
        let lines = buffer.lock().expect("lock").tail(10);
        assert_eq!(lines, vec!["first", "second", "partial"]);
    }
}

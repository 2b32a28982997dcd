/*
[INPUT]:  AppState snapshot
[OUTPUT]: Status line: timer mode, time left, filter, fetch status, counts
[POS]:    TUI UI toolbar rendering
[UPDATE]: When surfacing new state in the status line
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use todo_timer_editor::model::FetchStatus;
use todo_timer_editor::store::AppState;

use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_toolbar(frame: &mut ratatui::Frame, area: Rect, state: &AppState) {
    let widget = Paragraph::new(Line::from(toolbar_spans(state))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style()),
    );
    frame.render_widget(widget, area);
}

fn toolbar_spans(state: &AppState) -> Vec<Span<'static>> {
    let timer = &state.timer;
    let mode_style = if timer.mode {
        Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::styled(
        format!("Timer mode: {}", if timer.mode { "on" } else { "off" }),
        mode_style,
    )];

    if timer.mode && timer.is_typing {
        let style = if timer.remaining_seconds <= 10 {
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("Time left: {}s", timer.remaining_seconds),
            style,
        ));
    }

    spans.push(Span::raw(format!("  |  Filter: {}", state.filter)));

    match state.fetch.status {
        FetchStatus::Idle => {}
        FetchStatus::Loading => spans.push(Span::raw("  |  Loading…")),
        FetchStatus::Succeeded => spans.push(Span::raw("  |  Sample loaded")),
        FetchStatus::Failed => spans.push(Span::styled(
            format!(
                "  |  Error: {}",
                state.fetch.error.as_deref().unwrap_or("unknown")
            ),
            Style::default().fg(Color::LightRed),
        )),
    }

    spans.push(Span::raw(format!(
        "  |  {} items left, {} done",
        state.active_count(),
        state.completed_count()
    )));
    spans
}

/*
[INPUT]:  LogBufferHandle for UI
[OUTPUT]: Log panel rendered into Ratatui frame
[POS]:    TUI UI logs panel rendering
[UPDATE]: 2026-10-10 Read only the visible tail from the buffer
*/

use std::sync::PoisonError;

use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::LogBufferHandle;
use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_logs(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    buffer: &LogBufferHandle,
) {
    let available = area.height.saturating_sub(2) as usize;
    let (lines, total) = {
        let guard = buffer.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_empty() {
            (vec!["No log lines yet".to_string()], 0)
        } else {
            (guard.tail(available), guard.len())
        }
    };

    let text = lines.into_iter().map(Line::from).collect::<Vec<_>>();
    let log_widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(format!("Logs ({total})")),
    );
    frame.render_widget(log_widget, area);
}

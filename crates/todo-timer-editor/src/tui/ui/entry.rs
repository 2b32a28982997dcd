/*
[INPUT]:  TuiApp draft input and focus
[OUTPUT]: Single-line entry field with cursor placement
[POS]:    TUI UI entry field rendering
[UPDATE]: When changing draft editing affordances
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{Focus, TuiApp};
use crate::tui::runtime::border_style;

const PLACEHOLDER: &str = "What needs to be done?";

pub(in crate::tui) fn draw_entry(frame: &mut ratatui::Frame, area: Rect, app: &TuiApp) {
    let focused = app.focus == Focus::Entry;
    let width = area.width.saturating_sub(2) as usize;
    let scroll = app.input.visual_scroll(width);

    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        border_style()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title("New todo");

    let widget = if app.input.value().is_empty() && !focused {
        Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.input.value()).scroll((0, scroll as u16))
    };
    frame.render_widget(widget.block(block), area);

    if focused && app.pending_prompt.is_none() {
        let offset = app.input.visual_cursor().saturating_sub(scroll) as u16;
        frame.set_cursor_position((area.x + 1 + offset, area.y + 1));
    }
}

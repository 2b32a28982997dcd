/*
[INPUT]:  Confirmation prompt message
[OUTPUT]: Modal overlay asking whether to discard the draft
[POS]:    TUI UI confirmation modal
[UPDATE]: 2026-10-10 Replace form modals with the timeout confirmation
*/

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub(in crate::tui) fn draw_confirm(frame: &mut ratatui::Frame, area: Rect, message: &str) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightRed))
        .title("Time is up");
    let key_style = Style::default().add_modifier(Modifier::REVERSED);
    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", key_style),
            Span::raw(" Discard draft   "),
            Span::styled("[n]", key_style),
            Span::raw(" Keep editing"),
        ]),
    ];
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

/*
[INPUT]:  AppState visible items and TuiApp list selection
[OUTPUT]: Filtered todo list rendered into Ratatui frame
[POS]:    TUI UI todo list rendering
[UPDATE]: When changing item presentation
*/

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem};

use todo_timer_editor::store::AppState;

use crate::tui::app::{Focus, TuiApp};
use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_todo_list(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut TuiApp,
    state: &AppState,
) {
    let items: Vec<ListItem> = state
        .visible_items()
        .map(|item| {
            if item.completed {
                ListItem::new(format!("[x] {}", item.title)).style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ListItem::new(format!("[ ] {}", item.title))
            }
        })
        .collect();
    let items = if items.is_empty() {
        vec![ListItem::new("Nothing here yet")]
    } else {
        items
    };

    let highlight = if app.focus == Focus::List {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(format!("Todos ({})", state.filter)),
        )
        .highlight_style(highlight)
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

//! Task list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{App, PanelFocus};

use super::theme;

/// Render the task list panel: loading indicator, empty-state message, or
/// the list itself.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == PanelFocus::List {
        theme::highlighted()
    } else {
        theme::normal()
    };
    let block = Block::default()
        .title(Span::styled("Tasks", theme::bold().fg(theme::TASKS_TITLE)))
        .borders(Borders::ALL)
        .border_style(border_style);

    if app.snapshot.loading {
        let msg = Paragraph::new(Line::from(Span::styled(
            "Loading tasks...",
            theme::dimmed(),
        )))
        .block(block)
        .centered();
        frame.render_widget(msg, area);
        return;
    }

    if app.snapshot.tasks.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("Nothing to do.", theme::dimmed())),
            Line::from(Span::styled(
                "Add your first task below.",
                theme::dimmed(),
            )),
        ])
        .block(block)
        .centered();
        frame.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .snapshot
        .tasks
        .iter()
        .map(|task| {
            let checkbox = if task.completed { "[\u{2713}]" } else { "[ ]" };
            let style = if task.completed {
                theme::dimmed().add_modifier(ratatui::style::Modifier::CROSSED_OUT)
            } else {
                theme::normal()
            };
            ListItem::new(Line::from(vec![
                Span::styled(checkbox, style),
                Span::raw(" "),
                Span::styled(task.title.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::selected());

    let mut state = ListState::default();
    if app.focus == PanelFocus::List {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

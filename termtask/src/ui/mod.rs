//! Terminal UI rendering.

pub mod input_bar;
pub mod status_bar;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::tasks::Mode;

/// Main draw function for the entire UI.
///
/// Layout, top to bottom: an optional sample-mode banner, an optional
/// error banner, the title input, the task list, and the status bar.
pub fn draw(frame: &mut Frame, app: &App) {
    let offline = app.snapshot.mode == Mode::Offline;
    let has_error = app.snapshot.error.is_some();

    let mut constraints = Vec::with_capacity(5);
    if offline {
        constraints.push(Constraint::Length(1));
    }
    if has_error {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(3)); // input
    constraints.push(Constraint::Min(3)); // task list
    constraints.push(Constraint::Length(1)); // status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let mut next = 0;
    if offline {
        let banner = Paragraph::new(Line::from(Span::raw(
            " Sample mode \u{2014} changes are not saved remotely ",
        )))
        .style(theme::sample_banner())
        .centered();
        frame.render_widget(banner, chunks[next]);
        next += 1;
    }

    if let Some(error) = &app.snapshot.error {
        let banner = Paragraph::new(Line::from(Span::raw(format!(" {error} "))))
            .style(theme::error_banner())
            .centered();
        frame.render_widget(banner, chunks[next]);
        next += 1;
    }

    input_bar::render(frame, chunks[next], app);
    task_list::render(frame, chunks[next + 1], app);
    status_bar::render(frame, chunks[next + 2], app);
}

//! Title input rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, PanelFocus};
use crate::tasks::AddStatus;

use super::theme;

/// Render the new-task input with its submit feedback indicator.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == PanelFocus::Input {
        theme::highlighted()
    } else {
        theme::normal()
    };

    // The title doubles as the submit affordance state.
    let title = match app.snapshot.add_status {
        AddStatus::Idle => Span::styled("New task", theme::bold()),
        AddStatus::Submitting => Span::styled("Adding...", theme::dimmed()),
        AddStatus::Succeeded => Span::styled("Added \u{2713}", theme::bold().fg(theme::SUCCESS)),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut spans = vec![Span::styled(app.input.clone(), theme::normal())];
    if app.focus == PanelFocus::Input {
        spans.push(Span::styled("\u{2588}", theme::input_cursor()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

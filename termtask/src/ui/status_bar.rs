//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, PanelFocus};
use crate::tasks::Mode;

use super::theme;

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        PanelFocus::Input => "Enter: add | Tab: switch panel | Esc: quit",
        PanelFocus::List => {
            "\u{2191}\u{2193}/jk: navigate | Enter/Space: toggle | d: delete | Tab: switch panel | Esc: quit"
        }
    };

    let (dot_color, status_text) = match app.snapshot.mode {
        Mode::Connected => (theme::SUCCESS, "Connected"),
        Mode::Offline => (theme::WARNING, "Sample mode"),
    };

    let status_line = Line::from(vec![
        Span::styled("TermTask v0.1.0", theme::bold()),
        Span::raw(" | "),
        Span::styled("\u{25cf}", theme::normal().fg(dot_color)),
        Span::raw(format!(" {status_text}")),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}

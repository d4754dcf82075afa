//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success/connected indicator color.
pub const SUCCESS: Color = Color::Green;

/// Sample-mode banner color.
pub const WARNING: Color = Color::Yellow;

/// Error banner color.
pub const ERROR: Color = Color::Red;

/// Panel title color for the task list.
pub const TASKS_TITLE: Color = Color::Green;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (completed tasks, metadata).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for the sample-mode banner.
#[must_use]
pub fn sample_banner() -> Style {
    Style::default().fg(Color::Black).bg(WARNING)
}

/// Style for the error banner.
#[must_use]
pub fn error_banner() -> Style {
    Style::default().fg(FG_PRIMARY).bg(Color::Rgb(120, 30, 30))
}

/// Style for the status bar background.
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for the input cursor (bright white, bold).
#[must_use]
pub fn input_cursor() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

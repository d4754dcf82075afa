//! Application state and event handling for the TUI.
//!
//! [`App`] is the view projection: it holds the input line, the list
//! selection, and the latest [`TaskSnapshot`] from the sync driver. It
//! never mutates the task list itself — key events translate into
//! [`SyncCommand`]s that the main loop forwards to the driver, and the
//! list only changes when a fresh snapshot arrives.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use termtask_proto::task::MAX_TASK_TITLE_LENGTH;

use crate::sync::{SyncCommand, TaskSnapshot};
use crate::tasks::AddStatus;

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// The title input is focused (default).
    Input,
    /// The task list is focused.
    List,
}

/// Main application state.
pub struct App {
    /// Current text input.
    pub input: String,
    /// Cursor position in input (character index).
    pub cursor_position: usize,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Selected task index in the list.
    pub selected: usize,
    /// Latest controller state from the sync driver.
    pub snapshot: TaskSnapshot,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create a new application showing the loading state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            input: String::new(),
            cursor_position: 0,
            focus: PanelFocus::Input,
            selected: 0,
            snapshot: TaskSnapshot::initial(),
            should_quit: false,
        }
    }

    /// Replace the current snapshot, keeping the selection in bounds.
    pub fn apply_snapshot(&mut self, snapshot: TaskSnapshot) {
        self.snapshot = snapshot;
        let last = self.snapshot.tasks.len().saturating_sub(1);
        if self.selected > last {
            self.selected = last;
        }
    }

    /// Clear the input line (the in-flight add reached the list).
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Handle a key event, returning a command for the sync driver when
    /// the key maps to a user intent.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<SyncCommand> {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                return None;
            }
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.toggle_focus();
                return None;
            }
            _ => {}
        }

        match self.focus {
            PanelFocus::Input => self.handle_input_key(key),
            PanelFocus::List => self.handle_list_key(key),
        }
    }

    /// Key handling while the input is focused.
    fn handle_input_key(&mut self, key: KeyEvent) -> Option<SyncCommand> {
        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Char(c) => {
                self.enter_char(c);
                None
            }
            KeyCode::Backspace => {
                self.delete_char();
                None
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                if self.cursor_position < self.input.chars().count() {
                    self.cursor_position += 1;
                }
                None
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                None
            }
            KeyCode::End => {
                self.cursor_position = self.input.chars().count();
                None
            }
            _ => None,
        }
    }

    /// Key handling while the list is focused.
    fn handle_list_key(&mut self, key: KeyEvent) -> Option<SyncCommand> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.snapshot.tasks.len().saturating_sub(1);
                if self.selected < last {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self
                .selected_task_id()
                .map(|id| SyncCommand::ToggleTask { id }),
            KeyCode::Char('d') | KeyCode::Delete => self
                .selected_task_id()
                .map(|id| SyncCommand::DeleteTask { id }),
            _ => None,
        }
    }

    /// Submit the input as a new task.
    ///
    /// The submit affordance is disabled while an add is in flight; the
    /// input is kept and only cleared when the driver reports the add
    /// reached the list, so a failed add can be retried as-is.
    fn submit_input(&mut self) -> Option<SyncCommand> {
        if self.input.trim().is_empty() || self.snapshot.add_status == AddStatus::Submitting {
            return None;
        }
        Some(SyncCommand::AddTask {
            title: self.input.clone(),
        })
    }

    /// Insert a character at the cursor, up to the title length limit.
    fn enter_char(&mut self, c: char) {
        if self.input.chars().count() >= MAX_TASK_TITLE_LENGTH {
            return;
        }
        let byte_index = self.byte_index();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let byte_index = self.byte_index();
        self.input.remove(byte_index);
    }

    /// Byte offset of the cursor's character index.
    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_position)
            .map_or(self.input.len(), |(i, _)| i)
    }

    /// Id of the currently selected task, if the list is non-empty.
    fn selected_task_id(&self) -> Option<termtask_proto::task::TaskId> {
        self.snapshot.tasks.get(self.selected).map(|t| t.id)
    }

    /// Toggle focus between the input and the list.
    const fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Input => PanelFocus::List,
            PanelFocus::List => PanelFocus::Input,
        };
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

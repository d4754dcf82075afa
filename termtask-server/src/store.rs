//! In-memory task collection backing the demo API server.
//!
//! The [`TodoStore`] holds the ordered task list behind an async `RwLock`.
//! Insertion order is display order; ids are assigned from a monotonic
//! counter and never reused, even after deletion.

use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use termtask_proto::task::{Task, TaskId};

/// Thread-safe, ordered in-memory task list with monotonic id assignment.
pub struct TodoStore {
    tasks: RwLock<Vec<Task>>,
    next_id: AtomicI64,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    /// Creates an empty store. The first assigned id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Creates a store pre-populated with the given tasks.
    ///
    /// The id counter starts above the highest existing id so later
    /// creations never collide.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let max_id = tasks.iter().map(|t| t.id.as_i64()).max().unwrap_or(0);
        Self {
            tasks: RwLock::new(tasks),
            next_id: AtomicI64::new(max_id + 1),
        }
    }

    /// Returns a snapshot of the task list in insertion order.
    pub async fn list(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    /// Appends a new task with a fresh id and returns it.
    pub async fn create(&self, title: String) -> Task {
        let id = TaskId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let task = Task::new(id, title);
        let mut tasks = self.tasks.write().await;
        tasks.push(task.clone());
        task
    }

    /// Sets the completed flag of the task matching `id`.
    ///
    /// Returns the updated task, or `None` if no task matches.
    pub async fn set_completed(&self, id: TaskId, completed: bool) -> Option<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = completed;
        Some(task.clone())
    }

    /// Removes the task matching `id`.
    ///
    /// Returns `true` if a task was removed.
    pub async fn remove(&self, id: TaskId) -> bool {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        tasks.len() != before
    }
}

//! In-memory sample store used when the task API is unreachable.
//!
//! Mirrors the remote store's contract with zero latency and no failure
//! mode: every operation succeeds synchronously against an in-memory list.
//! Its entire purpose is to keep the UI functional when the live API
//! cannot be reached, so nothing here ever returns `Err`.

use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::Mutex;

use termtask_proto::task::{Task, TaskId};

use super::{StoreError, TaskStore};

/// First id handed out for locally-created tasks. Sits above the sample
/// ids and well outside the small integers a live server issues.
const LOCAL_ID_BASE: i64 = 1000;

/// The fixed demonstration set installed when offline mode is entered.
///
/// Ids 997-999 are reserved; a live server would never issue them.
#[must_use]
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new(TaskId::new(997), "Check the API server connection (sample task)"),
        Task {
            id: TaskId::new(998),
            title: "Try out sample mode (sample task)".to_string(),
            completed: true,
        },
        Task::new(TaskId::new(999), "Deploy the application (sample task)"),
    ]
}

/// In-memory task store seeded with the fixed demonstration set.
pub struct SampleStore {
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicI64,
}

impl Default for SampleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleStore {
    /// Creates a store seeded with [`sample_tasks`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(sample_tasks()),
            next_id: AtomicI64::new(LOCAL_ID_BASE),
        }
    }
}

impl TaskStore for SampleStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.lock().await.clone())
    }

    async fn create_task(&self, title: &str) -> Result<Task, StoreError> {
        let id = TaskId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let task = Task::new(id, title);
        self.tasks.lock().await.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, completed: bool) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.lock().await;
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = completed;
                Ok(task.clone())
            }
            // Unknown id is a no-op; echo a detached task so the
            // contract's return shape holds.
            None => Ok(Task {
                id,
                title: String::new(),
                completed,
            }),
        }
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), StoreError> {
        self.tasks.lock().await.retain(|t| t.id != id);
        Ok(())
    }
}

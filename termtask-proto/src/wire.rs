//! HTTP wire contract for the task collection resource.
//!
//! All bodies are UTF-8 JSON. The collection lives at [`TODOS_PATH`]:
//!
//! | operation | method | path              | request body    | success body            |
//! |-----------|--------|-------------------|-----------------|-------------------------|
//! | list      | GET    | `/api/todos`      | —               | array of tasks          |
//! | create    | POST   | `/api/todos`      | `{"title"}`     | the created task        |
//! | update    | PUT    | `/api/todos/{id}` | `{"completed"}` | the updated task        |
//! | delete    | DELETE | `/api/todos/{id}` | —               | any 2xx, body ignored   |
//!
//! Any non-2xx status or transport failure is treated as unreachable by the
//! client; no finer-grained outcome is modeled.

use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// Path of the task collection resource.
pub const TODOS_PATH: &str = "/api/todos";

/// Returns the path of a single task resource.
#[must_use]
pub fn todo_path(id: TaskId) -> String {
    format!("{TODOS_PATH}/{id}")
}

/// Request body for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTask {
    /// Title of the new task.
    pub title: String,
}

/// Request body for updating a task's completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New value of the completed flag.
    pub completed: bool,
}

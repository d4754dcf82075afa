//! HTTP client for the live task API.
//!
//! Wraps the four collection operations over reqwest. Every call is a
//! single attempt against a fresh request: no caching, no retries, and no
//! request timeout (a slow server is waited on, never aborted). Transport
//! failures and non-2xx statuses both collapse into
//! [`StoreError::Unreachable`].

use termtask_proto::task::{Task, TaskId};
use termtask_proto::wire::{CreateTask, TODOS_PATH, UpdateTask, todo_path};

use super::{StoreError, TaskStore};

/// Client for the remote task collection resource.
pub struct RemoteStore {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteStore {
    /// Creates a client for the API rooted at `base_url`
    /// (e.g., `http://127.0.0.1:8080`). A trailing slash is tolerated.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Builds an absolute URL from a contract path.
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Collapses a reqwest error into the single modeled failure kind.
    fn unreachable(err: reqwest::Error) -> StoreError {
        StoreError::Unreachable(err.to_string())
    }

    /// Sends a request and rejects non-success statuses.
    async fn send_ok(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let resp = req.send().await.map_err(Self::unreachable)?;
        resp.error_for_status().map_err(Self::unreachable)
    }
}

impl TaskStore for RemoteStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let resp = self.send_ok(self.http.get(self.url(TODOS_PATH))).await?;
        resp.json().await.map_err(Self::unreachable)
    }

    async fn create_task(&self, title: &str) -> Result<Task, StoreError> {
        let body = CreateTask {
            title: title.to_string(),
        };
        let resp = self
            .send_ok(self.http.post(self.url(TODOS_PATH)).json(&body))
            .await?;
        resp.json().await.map_err(Self::unreachable)
    }

    async fn update_task(&self, id: TaskId, completed: bool) -> Result<Task, StoreError> {
        let body = UpdateTask { completed };
        let resp = self
            .send_ok(self.http.put(self.url(&todo_path(id))).json(&body))
            .await?;
        resp.json().await.map_err(Self::unreachable)
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), StoreError> {
        // Any 2xx is success; the body is ignored.
        self.send_ok(self.http.delete(self.url(&todo_path(id))))
            .await?;
        Ok(())
    }
}

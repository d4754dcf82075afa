//! Server core: shared state, routes, and JSON handlers.
//!
//! An axum HTTP server exposing the task collection at `/api/todos`.
//! Handlers validate input with the shared proto rules and translate
//! domain failures into conventional status codes: 422 for an invalid
//! title, 404 for an unknown id.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use termtask_proto::task::{Task, TaskId, TitleError, validate_title};
use termtask_proto::wire::{CreateTask, TODOS_PATH, UpdateTask};

use crate::store::TodoStore;

/// Shared server state holding the task collection.
pub struct ApiState {
    /// The in-memory task collection.
    pub store: TodoStore,
}

impl Default for ApiState {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiState {
    /// Creates state with an empty task collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: TodoStore::new(),
        }
    }

    /// Creates state around an existing store.
    #[must_use]
    pub const fn with_store(store: TodoStore) -> Self {
        Self { store }
    }
}

/// Errors a handler can surface to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The submitted title failed validation.
    #[error(transparent)]
    InvalidTitle(#[from] TitleError),

    /// No task matches the requested id.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::InvalidTitle(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Builds the API router over the given state.
#[must_use]
pub fn router(state: Arc<ApiState>) -> axum::Router {
    axum::Router::new()
        .route(
            TODOS_PATH,
            axum::routing::get(list_todos).post(create_todo),
        )
        .route(
            "/api/todos/{id}",
            axum::routing::put(update_todo).delete(delete_todo),
        )
        .with_state(state)
}

/// `GET /api/todos` — the full task list in insertion order.
async fn list_todos(State(state): State<Arc<ApiState>>) -> Json<Vec<Task>> {
    Json(state.store.list().await)
}

/// `POST /api/todos` — create a task from a validated title.
async fn create_todo(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    validate_title(&body.title)?;
    let task = state.store.create(body.title.trim().to_string()).await;
    tracing::info!(id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /api/todos/{id}` — set the completed flag of one task.
async fn update_todo(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTask>,
) -> Result<Json<Task>, ApiError> {
    let id = TaskId::new(id);
    let task = state
        .store
        .set_completed(id, body.completed)
        .await
        .ok_or(ApiError::NotFound(id))?;
    tracing::info!(id = %task.id, completed = task.completed, "task updated");
    Ok(Json(task))
}

/// `DELETE /api/todos/{id}` — remove one task. Responds 204 on success.
async fn delete_todo(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = TaskId::new(id);
    if state.store.remove(id).await {
        tracing::info!(%id, "task deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(id))
    }
}

/// Starts the server with a fresh, empty task collection.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(ApiState::new())).await
}

/// Starts the server with a pre-configured [`ApiState`].
///
/// Binds the listener before returning, so an address with port 0 yields
/// the OS-assigned port in the returned `SocketAddr`.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<ApiState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "api server error");
        }
    });

    Ok((bound_addr, handle))
}

/// Demonstration tasks installed by the `--seed` flag.
#[must_use]
pub fn seed_tasks() -> Vec<Task> {
    vec![
        Task::new(TaskId::new(1), "Plan the week"),
        Task {
            id: TaskId::new(2),
            title: "Water the plants".to_string(),
            completed: true,
        },
        Task::new(TaskId::new(3), "Read one chapter"),
    ]
}

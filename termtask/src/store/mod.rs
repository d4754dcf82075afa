//! Task store abstraction for `TermTask`.
//!
//! Defines the [`TaskStore`] trait that both store implementations satisfy:
//! - [`remote::RemoteStore`] — HTTP client for the live task API
//! - [`sample::SampleStore`] — in-memory sample data used in offline mode
//!
//! The synchronization controller is generic over both and selects one per
//! operation based on the session mode; it never mixes the two within a
//! single operation.

pub mod remote;
pub mod sample;

use termtask_proto::task::{Task, TaskId};

/// Errors that can occur during store operations.
///
/// A single kind is modeled: the store could not be reached or refused the
/// request. The payload is a diagnostic string for logging; callers never
/// branch on it (timeout, DNS, and 5xx are deliberately not distinguished).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport failure or non-success status from the task service.
    #[error("task service unreachable: {0}")]
    Unreachable(String),
}

/// Async store trait covering the four task collection operations.
///
/// Every call is a single fresh attempt: implementations perform no
/// caching, no retries, and no timeout handling. Callers guarantee that
/// ids passed to [`TaskStore::update_task`] and [`TaskStore::delete_task`]
/// exist in their own view of the list; a store-side miss still surfaces
/// as [`StoreError::Unreachable`] (no distinct not-found outcome).
pub trait TaskStore {
    /// Fetch the full task list in display order.
    fn list_tasks(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Task>, StoreError>> + Send;

    /// Create a task with the given title and return it as confirmed by
    /// the store (store-assigned id, `completed` false unless the store
    /// says otherwise).
    fn create_task(
        &self,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Task, StoreError>> + Send;

    /// Set the completed flag of one task and return the confirmed task.
    fn update_task(
        &self,
        id: TaskId,
        completed: bool,
    ) -> impl std::future::Future<Output = Result<Task, StoreError>> + Send;

    /// Delete one task. Success carries no body.
    fn delete_task(
        &self,
        id: TaskId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

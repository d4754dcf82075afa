//! Integration tests for the remote store client against a live API server.
//!
//! Starts the demo server in-process on an OS-assigned port and exercises
//! the four collection operations end-to-end, including the failure paths
//! that collapse into the single unreachable outcome.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use termtask::store::remote::RemoteStore;
use termtask::store::{StoreError, TaskStore};
use termtask_proto::task::{Task, TaskId};
use termtask_server::server::{ApiState, start_server_with_state};
use termtask_server::store::TodoStore;

/// Start the API server in-process and return its base URL.
async fn start_api(tasks: Vec<Task>) -> String {
    let state = Arc::new(ApiState::with_store(TodoStore::with_tasks(tasks)));
    let (addr, _handle) = start_server_with_state("127.0.0.1:0", state)
        .await
        .expect("failed to start api server");
    format!("http://{addr}")
}

/// A URL on which nothing is listening.
async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn list_returns_server_tasks_in_order() {
    let base = start_api(vec![
        Task::new(TaskId::new(1), "first"),
        Task {
            id: TaskId::new(2),
            title: "second".to_string(),
            completed: true,
        },
    ])
    .await;
    let store = RemoteStore::new(base);

    let tasks = store.list_tasks().await.expect("list");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "first");
    assert!(!tasks[0].completed);
    assert!(tasks[1].completed);
}

#[tokio::test]
async fn create_returns_the_server_assigned_task() {
    let base = start_api(Vec::new()).await;
    let store = RemoteStore::new(base);

    let task = store.create_task("buy milk").await.expect("create");
    assert_eq!(task.title, "buy milk");
    assert!(!task.completed);
    assert_eq!(task.id, TaskId::new(1));

    let tasks = store.list_tasks().await.expect("list");
    assert_eq!(tasks, vec![task]);
}

#[tokio::test]
async fn update_returns_the_confirmed_task() {
    let base = start_api(vec![Task::new(TaskId::new(5), "toggle me")]).await;
    let store = RemoteStore::new(base);

    let updated = store.update_task(TaskId::new(5), true).await.expect("update");
    assert!(updated.completed);
    assert_eq!(updated.title, "toggle me");
}

#[tokio::test]
async fn delete_succeeds_and_removes() {
    let base = start_api(vec![Task::new(TaskId::new(5), "doomed")]).await;
    let store = RemoteStore::new(base);

    store.delete_task(TaskId::new(5)).await.expect("delete");
    assert!(store.list_tasks().await.expect("list").is_empty());
}

#[tokio::test]
async fn server_side_absence_is_unreachable() {
    // The client models no distinct not-found outcome; a 404 on update or
    // delete surfaces as the one unreachable error.
    let base = start_api(Vec::new()).await;
    let store = RemoteStore::new(base);

    let err = store.update_task(TaskId::new(42), true).await.unwrap_err();
    assert!(matches!(err, StoreError::Unreachable(_)));

    let err = store.delete_task(TaskId::new(42)).await.unwrap_err();
    assert!(matches!(err, StoreError::Unreachable(_)));
}

#[tokio::test]
async fn invalid_title_rejection_is_unreachable() {
    let base = start_api(Vec::new()).await;
    let store = RemoteStore::new(base);

    let err = store.create_task(&"x".repeat(101)).await.unwrap_err();
    assert!(matches!(err, StoreError::Unreachable(_)));
    assert!(store.list_tasks().await.expect("list").is_empty());
}

#[tokio::test]
async fn dead_server_is_unreachable_for_every_operation() {
    let store = RemoteStore::new(closed_port_url().await);

    assert!(matches!(
        store.list_tasks().await.unwrap_err(),
        StoreError::Unreachable(_)
    ));
    assert!(matches!(
        store.create_task("x").await.unwrap_err(),
        StoreError::Unreachable(_)
    ));
    assert!(matches!(
        store.update_task(TaskId::new(1), true).await.unwrap_err(),
        StoreError::Unreachable(_)
    ));
    assert!(matches!(
        store.delete_task(TaskId::new(1)).await.unwrap_err(),
        StoreError::Unreachable(_)
    ));
}

//! Integration tests for the synchronization controller over a live API.
//!
//! Runs the controller with the real HTTP store against the in-process
//! demo server: the connected happy paths, and the degradation behavior
//! when the server dies mid-session.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use termtask::store::TaskStore;
use termtask::store::remote::RemoteStore;
use termtask::store::sample::SampleStore;
use termtask::tasks::{AddOutcome, AddStatus, Mode, TaskController};
use termtask_proto::task::{Task, TaskId};
use termtask_server::server::{ApiState, start_server_with_state};
use termtask_server::store::TodoStore;

/// Start the API server in-process; returns the base URL and the handle
/// that can be aborted to simulate the server dying mid-session.
async fn start_api(tasks: Vec<Task>) -> (String, tokio::task::JoinHandle<()>) {
    let state = Arc::new(ApiState::with_store(TodoStore::with_tasks(tasks)));
    let (addr, handle) = start_server_with_state("127.0.0.1:0", state)
        .await
        .expect("failed to start api server");
    (format!("http://{addr}"), handle)
}

/// Abort the server task and wait for the listener to actually close.
async fn kill_server(handle: tokio::task::JoinHandle<()>) {
    handle.abort();
    let _ = handle.await;
    tokio::time::sleep(Duration::from_millis(20)).await;
}

#[tokio::test]
async fn initial_fetch_populates_connected_session() {
    let (base, _handle) = start_api(vec![Task::new(TaskId::new(1), "x")]).await;
    let mut ctl = TaskController::new(RemoteStore::new(base), SampleStore::new());

    ctl.initialize().await;

    assert_eq!(ctl.mode(), Mode::Connected);
    assert!(!ctl.is_loading());
    assert!(ctl.error().is_none());
    assert_eq!(ctl.tasks().len(), 1);
    assert_eq!(ctl.tasks()[0].id, TaskId::new(1));
    assert_eq!(ctl.tasks()[0].title, "x");
    assert!(!ctl.tasks()[0].completed);
}

#[tokio::test]
async fn connected_add_round_trips_through_the_server() {
    let (base, _handle) = start_api(Vec::new()).await;
    let mut ctl = TaskController::new(RemoteStore::new(base.clone()), SampleStore::new());
    ctl.initialize().await;

    let outcome = ctl.add_task("buy milk").await.expect("accepted");
    assert!(matches!(outcome, AddOutcome::Confirmed { .. }));
    assert_eq!(ctl.add_status(), AddStatus::Succeeded);
    assert_eq!(ctl.tasks().len(), 1);

    // The server agrees with the local list.
    let server_view = RemoteStore::new(base).list_tasks().await.expect("list");
    assert_eq!(server_view, ctl.tasks());
}

#[tokio::test]
async fn connected_toggle_applies_the_server_confirmed_value() {
    let (base, _handle) = start_api(vec![Task::new(TaskId::new(1), "x")]).await;
    let mut ctl = TaskController::new(RemoteStore::new(base.clone()), SampleStore::new());
    ctl.initialize().await;

    ctl.toggle_task(TaskId::new(1)).await;
    assert!(ctl.tasks()[0].completed);

    ctl.toggle_task(TaskId::new(1)).await;
    assert!(!ctl.tasks()[0].completed);

    let server_view = RemoteStore::new(base).list_tasks().await.expect("list");
    assert!(!server_view[0].completed);
}

#[tokio::test]
async fn connected_delete_removes_on_both_sides() {
    let (base, _handle) = start_api(vec![
        Task::new(TaskId::new(1), "keep"),
        Task::new(TaskId::new(2), "drop"),
    ])
    .await;
    let mut ctl = TaskController::new(RemoteStore::new(base.clone()), SampleStore::new());
    ctl.initialize().await;

    ctl.delete_task(TaskId::new(2)).await;
    assert_eq!(ctl.tasks().len(), 1);
    assert_eq!(ctl.tasks()[0].title, "keep");

    let server_view = RemoteStore::new(base).list_tasks().await.expect("list");
    assert_eq!(server_view.len(), 1);
}

#[tokio::test]
async fn add_failure_mid_session_surfaces_notice_and_keeps_list() {
    let (base, handle) = start_api(vec![Task::new(TaskId::new(1), "kept")]).await;
    let mut ctl = TaskController::new(RemoteStore::new(base), SampleStore::new());
    ctl.initialize().await;
    assert_eq!(ctl.mode(), Mode::Connected);

    kill_server(handle).await;

    let outcome = ctl.add_task("doomed").await.expect("accepted");
    assert_eq!(outcome, AddOutcome::Rejected);
    assert_eq!(ctl.add_status(), AddStatus::Idle);
    assert!(ctl.error().is_some());
    assert_eq!(ctl.tasks().len(), 1);
    // A mid-session outage never flips the mode; only the initial fetch
    // decides it.
    assert_eq!(ctl.mode(), Mode::Connected);
}

#[tokio::test]
async fn toggle_and_delete_failures_leave_last_known_good_state() {
    let (base, handle) = start_api(vec![Task::new(TaskId::new(1), "x")]).await;
    let mut ctl = TaskController::new(RemoteStore::new(base), SampleStore::new());
    ctl.initialize().await;

    kill_server(handle).await;

    ctl.toggle_task(TaskId::new(1)).await;
    assert!(!ctl.tasks()[0].completed);
    assert!(ctl.error().is_some());

    ctl.delete_task(TaskId::new(1)).await;
    assert_eq!(ctl.tasks().len(), 1);
    assert!(ctl.error().is_some());
}

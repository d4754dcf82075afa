//! Integration tests for the offline fallback path.
//!
//! Points the real HTTP store at a port nothing listens on and verifies
//! the permanent drop into sample mode, the sample-mode mutations, the
//! full add-feedback cycle through the sync driver, and the alternative
//! surface-error policy.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use tokio::sync::mpsc;

use termtask::store::remote::RemoteStore;
use termtask::store::sample::SampleStore;
use termtask::sync::{SyncCommand, SyncEvent, SyncOptions, TaskSnapshot, spawn_sync};
use termtask::tasks::{AddStatus, Mode, TaskController};
use termtask_proto::task::TaskId;

/// A URL on which nothing is listening.
async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

async fn offline_controller() -> TaskController<RemoteStore, SampleStore> {
    let remote = RemoteStore::new(closed_port_url().await);
    let mut ctl = TaskController::new(remote, SampleStore::new());
    ctl.initialize().await;
    ctl
}

async fn next_event(rx: &mut mpsc::Receiver<SyncEvent>) -> SyncEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for sync event")
        .expect("driver hung up")
}

async fn next_snapshot(rx: &mut mpsc::Receiver<SyncEvent>) -> TaskSnapshot {
    loop {
        if let SyncEvent::Refreshed(snapshot) = next_event(rx).await {
            return snapshot;
        }
    }
}

#[tokio::test]
async fn failed_initial_fetch_enters_sample_mode_silently() {
    let ctl = offline_controller().await;

    assert_eq!(ctl.mode(), Mode::Offline);
    assert!(ctl.error().is_none());
    assert!(!ctl.is_loading());

    // The fixed three-task demonstration set, two open and one done, with
    // ids reserved above anything a live server would issue.
    assert_eq!(ctl.tasks().len(), 3);
    assert_eq!(ctl.tasks().iter().filter(|t| t.completed).count(), 1);
    assert!(ctl.tasks().iter().all(|t| t.id.as_i64() >= 997));
}

#[tokio::test]
async fn sample_mode_survives_every_operation() {
    let mut ctl = offline_controller().await;

    ctl.add_task("locally added").await.expect("accepted");
    ctl.toggle_task(TaskId::new(997)).await;
    ctl.delete_task(TaskId::new(999)).await;

    assert_eq!(ctl.mode(), Mode::Offline);
    assert!(ctl.error().is_none());
    assert_eq!(ctl.tasks().len(), 3);
}

#[tokio::test]
async fn sample_mode_add_assigns_local_ids() {
    let mut ctl = offline_controller().await;

    ctl.add_task("buy milk").await.expect("accepted");
    let added = ctl.tasks().last().expect("added task");
    assert_eq!(added.title, "buy milk");
    assert!(!added.completed);
    assert!(added.id.as_i64() >= 1000);
}

#[tokio::test]
async fn driver_walks_the_two_delay_feedback_cycle() {
    let options = SyncOptions {
        submit_feedback: Duration::from_millis(10),
        success_display: Duration::from_millis(20),
        ..SyncOptions::default()
    };
    let remote = RemoteStore::new(closed_port_url().await);
    let (cmd_tx, mut evt_rx) = spawn_sync(remote, SampleStore::new(), options);

    let first = next_snapshot(&mut evt_rx).await;
    assert_eq!(first.mode, Mode::Offline);
    let baseline = first.tasks.len();

    cmd_tx
        .send(SyncCommand::AddTask {
            title: "buy milk".to_string(),
        })
        .await
        .expect("send");

    let submitting = next_snapshot(&mut evt_rx).await;
    assert_eq!(submitting.add_status, AddStatus::Submitting);

    assert!(matches!(next_event(&mut evt_rx).await, SyncEvent::AddApplied));

    let appended = next_snapshot(&mut evt_rx).await;
    assert_eq!(appended.tasks.len(), baseline + 1);
    assert_eq!(appended.add_status, AddStatus::Submitting);

    let succeeded = next_snapshot(&mut evt_rx).await;
    assert_eq!(succeeded.add_status, AddStatus::Succeeded);

    let idle = next_snapshot(&mut evt_rx).await;
    assert_eq!(idle.add_status, AddStatus::Idle);
    assert_eq!(idle.tasks.len(), baseline + 1);
}

#[tokio::test]
async fn surface_error_policy_keeps_the_list_empty() {
    let remote = RemoteStore::new(closed_port_url().await);
    let mut ctl = TaskController::new(remote, SampleStore::new()).with_offline_fallback(false);
    ctl.initialize().await;

    assert_eq!(ctl.mode(), Mode::Connected);
    assert!(ctl.error().is_some());
    assert!(ctl.tasks().is_empty());
}

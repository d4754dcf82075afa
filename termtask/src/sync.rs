//! Driver wiring the TUI to the async synchronization controller.
//!
//! The TUI event loop is poll-based and synchronous; the store calls are
//! async. This module bridges the two by running the [`TaskController`]
//! in a background tokio task and communicating over mpsc channels:
//!
//! ```text
//! TUI (main thread)  ←── SyncEvent ───  sync driver task
//!                     ─── SyncCommand →
//! ```
//!
//! Commands are processed one at a time, so no two operations ever mutate
//! the list concurrently. The driver also owns the wall clock for the
//! add-feedback machine: after an accepted add it schedules the submit
//! delay and the success display window as sleep tasks that post
//! epoch-tagged ticks back into its select loop.

use std::time::Duration;

use tokio::sync::mpsc;

use termtask_proto::task::{Task, TaskId};

use crate::store::TaskStore;
use crate::tasks::{AddOutcome, AddStatus, Mode, TaskController};

/// Commands sent from the TUI main loop to the sync driver.
#[derive(Debug)]
pub enum SyncCommand {
    /// Submit a new task with the given title.
    AddTask {
        /// Raw input text; the controller trims and validates it.
        title: String,
    },
    /// Flip the completed flag of one task.
    ToggleTask {
        /// Id of the task to toggle.
        id: TaskId,
    },
    /// Delete one task.
    DeleteTask {
        /// Id of the task to delete.
        id: TaskId,
    },
    /// Gracefully stop the driver.
    Shutdown,
}

/// Events sent from the driver to the TUI main loop.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// The controller state changed; replaces the view's previous snapshot.
    Refreshed(TaskSnapshot),
    /// The in-flight add reached the list; the view clears its input.
    AddApplied,
}

/// Read-only copy of the controller state for the view.
#[derive(Debug, Clone)]
pub struct TaskSnapshot {
    /// The task list in display order.
    pub tasks: Vec<Task>,
    /// Current session mode.
    pub mode: Mode,
    /// Whether the initial fetch is still pending.
    pub loading: bool,
    /// The last surfaced notice, if any.
    pub error: Option<String>,
    /// Add-operation feedback status.
    pub add_status: AddStatus,
}

impl TaskSnapshot {
    /// The view's state before the first driver event arrives: an empty
    /// list with the loading indicator showing.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            tasks: Vec::new(),
            mode: Mode::Connected,
            loading: true,
            error: None,
            add_status: AddStatus::Idle,
        }
    }
}

/// Tunables for the sync driver.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Initial-fetch failure policy (see
    /// [`TaskController::with_offline_fallback`]).
    pub offline_fallback: bool,
    /// Delay before an offline add shows success feedback.
    pub submit_feedback: Duration,
    /// How long success feedback stays up before resetting to idle.
    pub success_display: Duration,
    /// Capacity of the command/event channels.
    pub channel_capacity: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            offline_fallback: true,
            submit_feedback: Duration::from_millis(500),
            success_display: Duration::from_millis(1500),
            channel_capacity: 64,
        }
    }
}

/// Epoch-tagged feedback timer ticks posted back into the driver loop.
#[derive(Debug)]
enum FeedbackTick {
    /// Submit delay elapsed: `Submitting -> Succeeded` if still current.
    Confirm(u64),
    /// Display window elapsed: `Succeeded -> Idle` if still current.
    Clear(u64),
}

/// Spawns the sync driver and returns its channel handles.
///
/// The driver initializes the controller (the one-time list fetch, which
/// decides the session mode), emits a snapshot, and then serves commands
/// until [`SyncCommand::Shutdown`] arrives or the command channel closes.
pub fn spawn_sync<R, S>(
    remote: R,
    sample: S,
    options: SyncOptions,
) -> (mpsc::Sender<SyncCommand>, mpsc::Receiver<SyncEvent>)
where
    R: TaskStore + Send + Sync + 'static,
    S: TaskStore + Send + Sync + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<SyncCommand>(options.channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<SyncEvent>(options.channel_capacity);

    tokio::spawn(async move {
        let controller = TaskController::new(remote, sample)
            .with_offline_fallback(options.offline_fallback);
        drive(controller, cmd_rx, evt_tx, &options).await;
    });

    (cmd_tx, evt_rx)
}

/// The driver loop: one controller, sequential commands, scheduled ticks.
async fn drive<R: TaskStore, S: TaskStore>(
    mut controller: TaskController<R, S>,
    mut cmd_rx: mpsc::Receiver<SyncCommand>,
    evt_tx: mpsc::Sender<SyncEvent>,
    options: &SyncOptions,
) {
    let (tick_tx, mut tick_rx) = mpsc::channel::<FeedbackTick>(8);

    controller.initialize().await;
    send_snapshot(&evt_tx, &controller).await;

    loop {
        tokio::select! {
            Some(tick) = tick_rx.recv() => match tick {
                FeedbackTick::Confirm(epoch) => {
                    if controller.confirm_add_feedback(epoch) {
                        send_snapshot(&evt_tx, &controller).await;
                        schedule(&tick_tx, FeedbackTick::Clear(epoch), options.success_display);
                    }
                }
                FeedbackTick::Clear(epoch) => {
                    if controller.clear_add_feedback(epoch) {
                        send_snapshot(&evt_tx, &controller).await;
                    }
                }
            },
            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else { break };
                match cmd {
                    SyncCommand::AddTask { title } => {
                        handle_add(&mut controller, &evt_tx, &tick_tx, options, &title).await;
                    }
                    SyncCommand::ToggleTask { id } => {
                        controller.toggle_task(id).await;
                        send_snapshot(&evt_tx, &controller).await;
                    }
                    SyncCommand::DeleteTask { id } => {
                        controller.delete_task(id).await;
                        send_snapshot(&evt_tx, &controller).await;
                    }
                    SyncCommand::Shutdown => {
                        tracing::info!("sync driver shutting down");
                        break;
                    }
                }
            }
        }
    }
}

/// Runs one add through the controller and schedules its feedback timers.
async fn handle_add<R: TaskStore, S: TaskStore>(
    controller: &mut TaskController<R, S>,
    evt_tx: &mpsc::Sender<SyncEvent>,
    tick_tx: &mpsc::Sender<FeedbackTick>,
    options: &SyncOptions,
    title: &str,
) {
    let Some(pending) = controller.begin_add(title) else {
        // Refused adds may still surface a notice (over-long title).
        send_snapshot(evt_tx, controller).await;
        return;
    };
    send_snapshot(evt_tx, controller).await;

    match controller.finish_add(pending).await {
        AddOutcome::Confirmed { epoch } => {
            let _ = evt_tx.send(SyncEvent::AddApplied).await;
            send_snapshot(evt_tx, controller).await;
            schedule(tick_tx, FeedbackTick::Clear(epoch), options.success_display);
        }
        AddOutcome::Pending { epoch } => {
            let _ = evt_tx.send(SyncEvent::AddApplied).await;
            send_snapshot(evt_tx, controller).await;
            schedule(tick_tx, FeedbackTick::Confirm(epoch), options.submit_feedback);
        }
        AddOutcome::Rejected => {
            send_snapshot(evt_tx, controller).await;
        }
    }
}

/// Posts a feedback tick back into the driver loop after `delay`.
fn schedule(tick_tx: &mpsc::Sender<FeedbackTick>, tick: FeedbackTick, delay: Duration) {
    let tx = tick_tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(tick).await;
    });
}

/// Emits the controller's current state as a [`SyncEvent::Refreshed`].
async fn send_snapshot<R: TaskStore, S: TaskStore>(
    evt_tx: &mpsc::Sender<SyncEvent>,
    controller: &TaskController<R, S>,
) {
    let snapshot = TaskSnapshot {
        tasks: controller.tasks().to_vec(),
        mode: controller.mode(),
        loading: controller.is_loading(),
        error: controller.error().map(String::from),
        add_status: controller.add_status(),
    };
    let _ = evt_tx.send(SyncEvent::Refreshed(snapshot)).await;
}

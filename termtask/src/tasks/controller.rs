//! The synchronization controller: authoritative owner of the task list.
//!
//! `TaskController` holds the list, the session [`Mode`], the loading
//! flag, the last surfaced error, and the add-operation status machine.
//! Mutations follow a confirm-then-apply discipline: the selected store is
//! asked first and the list only changes when the store reports success,
//! so a failed call never needs a rollback. The sample store confirms
//! synchronously, which is what makes offline mode feel optimistic.
//!
//! Timer-driven feedback transitions (`Submitting -> Succeeded -> Idle`)
//! are split out as [`TaskController::confirm_add_feedback`] and
//! [`TaskController::clear_add_feedback`] so the caller owns wall-clock
//! scheduling; an epoch token keeps a stale timer from touching a newer
//! add flow.

use termtask_proto::task::{MAX_TASK_TITLE_LENGTH, Task, TaskId, TitleError, validate_title};

use crate::store::TaskStore;

use super::{AddStatus, Mode};

/// Notice shown when the initial fetch fails under the surface-error policy.
const FETCH_FAILED_NOTICE: &str = "Could not reach the task server. Try again later.";

/// Notice shown when a connected-mode add fails.
const ADD_FAILED_NOTICE: &str = "Could not add the task. Check the connection.";

/// Notice shown when a connected-mode toggle fails.
const UPDATE_FAILED_NOTICE: &str = "Could not update the task.";

/// Notice shown when a connected-mode delete fails.
const DELETE_FAILED_NOTICE: &str = "Could not delete the task.";

/// An accepted add whose store call has not run yet.
///
/// Produced by [`TaskController::begin_add`] and consumed by
/// [`TaskController::finish_add`]; holding one means the status machine is
/// in `Submitting`.
#[derive(Debug)]
#[must_use]
pub struct PendingAdd {
    title: String,
    epoch: u64,
}

/// How an add settled, and what feedback scheduling it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The store confirmed the task and the status is `Succeeded`;
    /// schedule the display-window reset.
    Confirmed {
        /// Token for the matching [`TaskController::clear_add_feedback`] call.
        epoch: u64,
    },
    /// The sample store appended the task but the status stays
    /// `Submitting`; confirm success feedback after the submit delay.
    Pending {
        /// Token for the matching feedback calls.
        epoch: u64,
    },
    /// The store failed; the list is unchanged, a notice is surfaced, and
    /// the status is back to `Idle` without passing through `Succeeded`.
    Rejected,
}

/// Single authoritative owner of the task list and session state.
///
/// Generic over the remote store `R` and the sample store `S`; each
/// operation selects exactly one of the two based on the current mode.
pub struct TaskController<R, S> {
    remote: R,
    sample: S,
    tasks: Vec<Task>,
    mode: Mode,
    loading: bool,
    error: Option<String>,
    add_status: AddStatus,
    add_epoch: u64,
    offline_fallback: bool,
}

impl<R: TaskStore, S: TaskStore> TaskController<R, S> {
    /// Creates a controller with an empty list, `Connected` mode, and the
    /// offline-fallback policy for initial-fetch failures.
    pub fn new(remote: R, sample: S) -> Self {
        Self {
            remote,
            sample,
            tasks: Vec::new(),
            mode: Mode::Connected,
            loading: false,
            error: None,
            add_status: AddStatus::Idle,
            add_epoch: 0,
            offline_fallback: true,
        }
    }

    /// Selects the initial-fetch failure policy.
    ///
    /// `true` (the default) switches into sample mode silently when the
    /// first fetch fails; `false` surfaces the error, leaves the list
    /// empty, and never enters sample mode.
    pub const fn with_offline_fallback(mut self, enabled: bool) -> Self {
        self.offline_fallback = enabled;
        self
    }

    /// Fetches the initial task list. Called exactly once per session.
    ///
    /// On success the confirmed list replaces the empty one and the mode
    /// stays `Connected`. On failure, the fallback policy decides: either
    /// the session drops into sample mode for good, seeded with the
    /// demonstration set, or the error is surfaced over an empty list.
    pub async fn initialize(&mut self) {
        self.loading = true;
        match self.remote.list_tasks().await {
            Ok(tasks) => {
                tracing::info!(count = tasks.len(), "task list fetched");
                self.tasks = tasks;
                self.error = None;
            }
            Err(e) if self.offline_fallback => {
                tracing::warn!(error = %e, "task API unreachable, entering sample mode");
                self.error = None;
                self.mode = Mode::Offline;
                self.tasks = self.sample.list_tasks().await.unwrap_or_default();
            }
            Err(e) => {
                tracing::warn!(error = %e, "task list fetch failed");
                self.error = Some(FETCH_FAILED_NOTICE.to_string());
                self.tasks.clear();
            }
        }
        self.loading = false;
    }

    /// Accepts an add if one can start now.
    ///
    /// Returns `None` without touching any state when the trimmed title is
    /// empty or another add is still `Submitting` (at most one add is in
    /// flight at a time). A title over [`MAX_TASK_TITLE_LENGTH`] code
    /// points surfaces a notice and is also refused. Otherwise the status
    /// machine enters `Submitting` under a fresh epoch.
    pub fn begin_add(&mut self, title: &str) -> Option<PendingAdd> {
        if self.add_status == AddStatus::Submitting {
            return None;
        }
        let trimmed = title.trim();
        match validate_title(trimmed) {
            Ok(()) => {}
            Err(TitleError::Empty) => return None,
            Err(TitleError::TooLong) => {
                self.error = Some(format!(
                    "Task titles are limited to {MAX_TASK_TITLE_LENGTH} characters."
                ));
                return None;
            }
        }
        self.add_epoch += 1;
        self.add_status = AddStatus::Submitting;
        Some(PendingAdd {
            title: trimmed.to_string(),
            epoch: self.add_epoch,
        })
    }

    /// Runs the store call for an accepted add.
    ///
    /// Offline: the sample store appends synchronously and the outcome is
    /// [`AddOutcome::Pending`] — the caller holds success feedback back for
    /// the configured submit delay. Connected: a single `create_task`
    /// attempt; confirmation appends the server's task and enters
    /// `Succeeded`, failure surfaces a notice and returns straight to
    /// `Idle`.
    pub async fn finish_add(&mut self, pending: PendingAdd) -> AddOutcome {
        let PendingAdd { title, epoch } = pending;
        let result = match self.mode {
            Mode::Offline => self.sample.create_task(&title).await,
            Mode::Connected => self.remote.create_task(&title).await,
        };
        match result {
            Ok(task) => {
                self.tasks.push(task);
                self.error = None;
                if self.mode == Mode::Offline {
                    AddOutcome::Pending { epoch }
                } else {
                    self.add_status = AddStatus::Succeeded;
                    AddOutcome::Confirmed { epoch }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "create task failed");
                self.error = Some(ADD_FAILED_NOTICE.to_string());
                self.add_status = AddStatus::Idle;
                AddOutcome::Rejected
            }
        }
    }

    /// Accepts and settles an add in one call.
    ///
    /// Convenience over [`Self::begin_add`] + [`Self::finish_add`] for
    /// callers that do not need to observe the `Submitting` state between
    /// the two.
    pub async fn add_task(&mut self, title: &str) -> Option<AddOutcome> {
        let pending = self.begin_add(title)?;
        Some(self.finish_add(pending).await)
    }

    /// Moves `Submitting` feedback to `Succeeded` for the given epoch.
    ///
    /// Scheduled by the caller once the submit delay elapses after an
    /// [`AddOutcome::Pending`]. A stale epoch or an already-settled status
    /// leaves everything untouched.
    pub fn confirm_add_feedback(&mut self, epoch: u64) -> bool {
        if epoch == self.add_epoch && self.add_status == AddStatus::Submitting {
            self.add_status = AddStatus::Succeeded;
            true
        } else {
            false
        }
    }

    /// Resets `Succeeded` feedback to `Idle` for the given epoch.
    ///
    /// Scheduled by the caller once the success display window elapses.
    /// A stale epoch never resets a newer flow's feedback.
    pub fn clear_add_feedback(&mut self, epoch: u64) -> bool {
        if epoch == self.add_epoch && self.add_status == AddStatus::Succeeded {
            self.add_status = AddStatus::Idle;
            true
        } else {
            false
        }
    }

    /// Flips the completed flag of the task matching `id`.
    ///
    /// No-op when the id is not in the list. The selected store confirms
    /// first; the confirmed task then replaces the local one. A failed
    /// connected-mode call surfaces a notice and leaves the list unchanged
    /// (nothing was applied, so there is nothing to roll back).
    pub async fn toggle_task(&mut self, id: TaskId) {
        let Some(current) = self.tasks.iter().find(|t| t.id == id) else {
            return;
        };
        let next = !current.completed;
        let result = match self.mode {
            Mode::Offline => self.sample.update_task(id, next).await,
            Mode::Connected => self.remote.update_task(id, next).await,
        };
        match result {
            Ok(updated) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
                    *slot = updated;
                }
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "update task failed");
                self.error = Some(UPDATE_FAILED_NOTICE.to_string());
            }
        }
    }

    /// Removes the task matching `id`.
    ///
    /// No-op when the id is not in the list. The selected store confirms
    /// the deletion before the task leaves the list; a failed
    /// connected-mode call surfaces a notice and leaves the list unchanged.
    pub async fn delete_task(&mut self, id: TaskId) {
        if !self.tasks.iter().any(|t| t.id == id) {
            return;
        }
        let result = match self.mode {
            Mode::Offline => self.sample.delete_task(id).await,
            Mode::Connected => self.remote.delete_task(id).await,
        };
        match result {
            Ok(()) => {
                self.tasks.retain(|t| t.id != id);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "delete task failed");
                self.error = Some(DELETE_FAILED_NOTICE.to_string());
            }
        }
    }

    /// The task list in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The current session mode. Only [`Self::initialize`] writes this.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the initial fetch is still pending.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last surfaced notice, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current add-operation feedback status.
    #[must_use]
    pub const fn add_status(&self) -> AddStatus {
        self.add_status
    }
}

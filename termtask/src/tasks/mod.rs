//! Task list synchronization for `TermTask`.
//!
//! [`TaskController`] owns the authoritative task list, the session mode,
//! and the add-operation feedback state machine. It is generic over the
//! two store implementations and routes each operation to the live API or
//! the sample store based on the current mode.

pub mod controller;

pub use controller::{AddOutcome, PendingAdd, TaskController};

/// Whether the session is backed by the live API or the sample store.
///
/// Starts `Connected`; switches to `Offline` permanently when the initial
/// list fetch fails under the fallback policy. No operation ever switches
/// back within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Operations go to the remote task API.
    Connected,
    /// Operations go to the in-memory sample store.
    Offline,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connected => write!(f, "connected"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// Transient status of the pending add interaction.
///
/// Drives the submit affordance only; it has no effect on list
/// correctness. Reset to `Idle` a fixed display window after `Succeeded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddStatus {
    /// No add in flight.
    #[default]
    Idle,
    /// An add was accepted and its store call has not settled.
    Submitting,
    /// The store confirmed the add; success feedback is showing.
    Succeeded,
}

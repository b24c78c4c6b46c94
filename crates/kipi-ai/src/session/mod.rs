//! Conversation session management.
//!
//! A [`SessionState`] owns the history, usage counter and phase of one
//! session. A [`SessionController`] drives it through
//! `Idle -> AwaitingModel -> Rendering -> Idle` for each user turn.

mod controller;
mod state;
mod transcript;

pub use controller::{SessionController, TurnReport};
pub use state::{Phase, SessionState, SessionStats};
pub use transcript::{format_turns, timestamped_name, Transcript, DEFAULT_EXPORT_PREFIX};

/// Misuse of the session controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("input is empty")]
    EmptyInput,
    #[error("session is busy ({0:?})")]
    Busy(Phase),
}

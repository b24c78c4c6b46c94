//! Per-session state and the phase guard.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use kipi_common::{GenerationConfig, SessionId};

use crate::conversation::{ConversationStore, Turn};
use crate::usage::UsageTracker;

use super::SessionError;

/// Where a session is in its request/response cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingModel,
    Rendering,
}

impl Phase {
    fn as_u8(self) -> u8 {
        match self {
            Phase::Idle => 0,
            Phase::AwaitingModel => 1,
            Phase::Rendering => 2,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            1 => Phase::AwaitingModel,
            2 => Phase::Rendering,
            _ => Phase::Idle,
        }
    }
}

/// Everything one interactive session owns.
///
/// Each session gets its own value; nothing here is shared between
/// sessions.
pub struct SessionState {
    pub(super) id: SessionId,
    pub(super) conversation: ConversationStore,
    pub(super) usage: UsageTracker,
    pub(super) phase: AtomicU8,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            conversation: ConversationStore::new(),
            usage: UsageTracker::new(),
            phase: AtomicU8::new(Phase::Idle.as_u8()),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn conversation(&self) -> &ConversationStore {
        &self.conversation
    }

    /// Snapshot of the full history.
    pub fn turns(&self) -> Vec<Turn> {
        self.conversation.all()
    }

    pub fn message_count(&self) -> usize {
        self.conversation.len()
    }

    /// Approximate token usage since the last clear.
    pub fn estimated_tokens(&self) -> u64 {
        self.usage.value()
    }

    pub fn stats(&self, generation: &GenerationConfig) -> SessionStats {
        SessionStats {
            pairs: self.conversation.len() / 2,
            estimated_tokens: self.usage.value(),
            model: generation.model.clone(),
            temperature: generation.temperature,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("id", &self.id)
            .field("phase", &self.phase())
            .field("messages", &self.conversation.len())
            .field("estimated_tokens", &self.usage.value())
            .finish()
    }
}

/// Summary shown by the statistics view.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    /// Completed user/assistant pairs.
    pub pairs: usize,
    pub estimated_tokens: u64,
    pub model: String,
    pub temperature: f64,
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "💬 conversations: {} | 🎯 model: {} | 🌡️ temperature: {} | 📊 estimated tokens: {}",
            self.pairs, self.model, self.temperature, self.estimated_tokens
        )
    }
}

/// Moves a session out of `Idle` for the duration of one turn and puts it
/// back on drop, including when the turn's future is dropped early.
pub(super) struct PhaseGuard<'a> {
    phase: &'a AtomicU8,
}

impl<'a> PhaseGuard<'a> {
    /// Enter `AwaitingModel`. Returns `Err` if the session is not idle.
    pub(super) fn acquire(phase: &'a AtomicU8) -> Result<Self, SessionError> {
        phase
            .compare_exchange(
                Phase::Idle.as_u8(),
                Phase::AwaitingModel.as_u8(),
                Ordering::Acquire,
                Ordering::Relaxed,
            )
            .map_err(|current| SessionError::Busy(Phase::from_u8(current)))?;
        Ok(Self { phase })
    }

    pub(super) fn advance(&self, next: Phase) {
        self.phase.store(next.as_u8(), Ordering::Release);
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.phase.store(Phase::Idle.as_u8(), Ordering::Release);
    }
}

//! Conversation engine for kipi.
//!
//! Provides:
//! - A Gemini model client adapter that never fails past its boundary
//! - An append-only conversation store
//! - A lazy response renderer with injectable pacing
//! - A word-based usage tracker
//! - A session controller tying them together, plus transcript export

pub mod conversation;
pub mod gemini;
pub mod outcome;
pub mod render;
pub mod session;
pub mod usage;

use async_trait::async_trait;

use kipi_common::GenerationConfig;

pub use conversation::{ConversationStore, Role, Turn};
pub use gemini::{GeminiClient, GeminiConfig};
pub use outcome::{classify_error, is_offline_credential, CallResult, ErrorKind};
pub use render::{DisplayUpdate, FixedPacer, NoPacer, Pacer, RenderEvents, Renderer};
pub use session::{
    Phase, SessionController, SessionError, SessionState, SessionStats, Transcript, TurnReport,
};
pub use usage::{word_count, UsageTracker};

/// A single-shot text generation backend.
///
/// Implementations convert every outcome, including transport failures,
/// into a [`CallResult`]; nothing is raised to the caller.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
        credential: &str,
    ) -> CallResult;
}

/// Transport-level failure inside a client adapter.
///
/// The `Display` text is what error classification inspects.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited: {0}")]
    RateLimited(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout: {0}")]
    Timeout(String),
}

//! The session controller: one user turn from input to stored reply.

use chrono::Local;
use tracing::{debug, info};

use kipi_common::GenerationConfig;

use crate::conversation::Turn;
use crate::outcome::ErrorKind;
use crate::render::{DisplayUpdate, NoPacer, Pacer, Renderer};
use crate::ModelClient;

use super::state::{Phase, PhaseGuard, SessionState};
use super::transcript::{
    format_turns, normalize_name, timestamped_name, Transcript, DEFAULT_EXPORT_PREFIX,
};
use super::SessionError;

/// What happened during one completed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Text stored as the assistant turn (the fallback when the call failed).
    pub reply: String,
    /// Set when the model call failed and a fallback was used.
    pub error: Option<ErrorKind>,
    pub message_count: usize,
    pub estimated_tokens: u64,
}

/// Drives a [`SessionState`] through model calls and rendering.
///
/// The controller holds no conversation data itself, so one controller
/// can serve several independently owned sessions.
pub struct SessionController {
    client: Box<dyn ModelClient>,
    renderer: Renderer,
    pacer: Box<dyn Pacer>,
    export_prefix: String,
}

impl SessionController {
    pub fn new(client: impl ModelClient + 'static) -> Self {
        Self {
            client: Box::new(client),
            renderer: Renderer::default(),
            pacer: Box::new(NoPacer),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    pub fn with_export_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.export_prefix = prefix.into();
        self
    }

    /// Run one turn: store the user input, call the model, replay the
    /// reply through `on_update`, then store the reply and record usage.
    ///
    /// `config` is cloned on entry, so the values in effect when the call
    /// starts are the ones used. A failed model call is not an error
    /// here; its fallback text becomes the assistant turn.
    pub async fn submit<F>(
        &self,
        state: &mut SessionState,
        input: &str,
        config: &GenerationConfig,
        credential: &str,
        mut on_update: F,
    ) -> Result<TurnReport, SessionError>
    where
        F: FnMut(&DisplayUpdate),
    {
        if input.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let guard = PhaseGuard::acquire(&state.phase)?;
        let config = config.clone();

        state.conversation.append(Turn::user(input));
        debug!(
            session = %state.id.short(),
            model = %config.model,
            mode = %config.output_mode,
            "awaiting model"
        );

        let result = self.client.generate(input, &config, credential).await;
        let error = result.error_kind();
        let reply = result.into_reply_text();

        guard.advance(Phase::Rendering);
        for update in self.renderer.render(reply.clone(), config.output_mode) {
            on_update(&update);
            if !update.is_final {
                self.pacer.pause().await;
            }
        }

        state.conversation.append(Turn::assistant(reply.clone()));
        state.usage.record(input, &reply);
        drop(guard);

        info!(
            session = %state.id.short(),
            messages = state.conversation.len(),
            estimated_tokens = state.usage.value(),
            failed = error.is_some(),
            "turn complete"
        );

        Ok(TurnReport {
            reply,
            error,
            message_count: state.conversation.len(),
            estimated_tokens: state.usage.value(),
        })
    }

    /// Reset the conversation and the usage counter together.
    pub fn clear(&self, state: &mut SessionState) -> Result<(), SessionError> {
        let phase = state.phase();
        if phase != Phase::Idle {
            return Err(SessionError::Busy(phase));
        }
        state.conversation.clear();
        state.usage.reset();
        info!(session = %state.id.short(), "conversation cleared");
        Ok(())
    }

    /// Format the conversation without modifying it.
    ///
    /// An empty conversation yields a transcript with an empty body. A
    /// name with no usable file part falls back to a timestamped one.
    pub fn export(&self, state: &SessionState, name: Option<&str>) -> Transcript {
        let name = match name.and_then(normalize_name) {
            Some(n) => n,
            None => timestamped_name(&self.export_prefix, Local::now()),
        };
        Transcript {
            name,
            body: format_turns(state.conversation.iter()),
        }
    }
}

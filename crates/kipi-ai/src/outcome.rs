//! Call outcomes, error classification, and fallback text.

use std::fmt;

/// Credential value shipped in sample configs; treated the same as no key.
pub const PLACEHOLDER_CREDENTIAL: &str = "your-gemini-api-key-here";

/// Why a model call failed.
///
/// A missing credential is not a failure: it routes to the offline
/// demonstration reply instead (see [`is_offline_credential`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credential rejected by the service.
    Auth,
    /// Quota or rate limit exceeded.
    RateLimited,
    /// Anything else: network, parse, timeout, unexpected status.
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Auth => write!(f, "auth"),
            ErrorKind::RateLimited => write!(f, "rate_limited"),
            ErrorKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of one model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallResult {
    Success(String),
    Failure {
        kind: ErrorKind,
        /// Raw error text from the transport or service.
        detail: String,
        /// Human-readable reply that keeps the conversation going.
        fallback: String,
    },
}

impl CallResult {
    /// Build a failure, classifying `detail` and composing the fallback reply.
    pub fn failure(detail: impl Into<String>, prompt: &str) -> Self {
        let detail = detail.into();
        let kind = classify_error(&detail);
        let fallback = fallback_text(kind, &detail, prompt);
        CallResult::Failure {
            kind,
            detail,
            fallback,
        }
    }

    /// The text shown to the user and stored as the assistant turn.
    pub fn into_reply_text(self) -> String {
        match self {
            CallResult::Success(text) => text,
            CallResult::Failure { fallback, .. } => fallback,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            CallResult::Success(_) => None,
            CallResult::Failure { kind, .. } => Some(*kind),
        }
    }
}

/// Classify an error by inspecting its text.
///
/// `API_KEY` is matched case-sensitively (it is the service's reason
/// code); the other markers are matched case-insensitively. Auth takes
/// precedence over rate limiting.
pub fn classify_error(detail: &str) -> ErrorKind {
    let lower = detail.to_lowercase();
    if detail.contains("API_KEY") || lower.contains("authentication") {
        ErrorKind::Auth
    } else if lower.contains("quota") || lower.contains("limit") {
        ErrorKind::RateLimited
    } else {
        ErrorKind::Unknown
    }
}

/// True when `credential` cannot be used for a real call.
pub fn is_offline_credential(credential: &str) -> bool {
    let credential = credential.trim();
    credential.is_empty() || credential == PLACEHOLDER_CREDENTIAL
}

/// Reply used when no usable credential is configured.
pub fn demo_reply(prompt: &str) -> String {
    format!(
        "⚠️ No API key is configured. Set one in the config file, the \
         GEMINI_API_KEY environment variable, or with /key.\n\n\
         Demo reply: this is an answer to '{prompt}'. With a real key, \
         Gemini would answer it properly."
    )
}

fn fallback_text(kind: ErrorKind, detail: &str, prompt: &str) -> String {
    match kind {
        ErrorKind::Auth => format!(
            "🔑 API key error: please check your API key.\n\n\
             Details: {detail}\n\n\
             Your message was: '{prompt}'"
        ),
        ErrorKind::RateLimited => format!(
            "📊 Usage limit exceeded: please check your API quota.\n\n\
             Details: {detail}\n\n\
             Your message was: '{prompt}'"
        ),
        ErrorKind::Unknown => format!(
            "❌ The API call failed: {detail}\n\n\
             Demo reply: I'll answer your question about '{prompt}' once \
             the service is reachable."
        ),
    }
}

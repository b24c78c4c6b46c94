//! Approximate usage tracking.

/// Number of whitespace-separated words in `text`.
pub fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// Running word-based estimate of token usage for one session.
///
/// This is a rough proxy; it is not meant to match the service's
/// tokenizer.
#[derive(Debug, Clone, Default)]
pub struct UsageTracker {
    estimated_tokens: u64,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the word counts of one completed prompt/response pair.
    pub fn record(&mut self, prompt: &str, response: &str) {
        self.estimated_tokens = self
            .estimated_tokens
            .saturating_add(word_count(prompt))
            .saturating_add(word_count(response));
    }

    pub fn value(&self) -> u64 {
        self.estimated_tokens
    }

    pub fn reset(&mut self) {
        self.estimated_tokens = 0;
    }
}

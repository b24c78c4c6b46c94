//! Settings that can change between turns.

use std::fmt;

use kipi_common::{ConfigError, GenerationConfig, OutputMode};
use kipi_config::validation;

/// Generation parameters and credential in effect for the next turn.
#[derive(Clone)]
pub struct RuntimeSettings {
    pub generation: GenerationConfig,
    pub credential: String,
}

impl fmt::Debug for RuntimeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeSettings")
            .field("generation", &self.generation)
            .field("credential", &"[REDACTED]")
            .finish()
    }
}

impl RuntimeSettings {
    pub fn new(generation: GenerationConfig, credential: impl Into<String>) -> Self {
        Self {
            generation,
            credential: credential.into(),
        }
    }

    pub fn set_model(&mut self, model: &str) -> Result<(), ConfigError> {
        validation::validate_model(model)?;
        self.generation.model = model.to_string();
        Ok(())
    }

    pub fn set_temperature(&mut self, temperature: f64) -> Result<(), ConfigError> {
        validation::validate_temperature(temperature)?;
        self.generation.temperature = temperature;
        Ok(())
    }

    pub fn set_max_output_tokens(&mut self, max_output_tokens: u32) -> Result<(), ConfigError> {
        validation::validate_max_output_tokens(max_output_tokens)?;
        self.generation.max_output_tokens = max_output_tokens;
        Ok(())
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.generation.output_mode = mode;
    }

    pub fn set_credential(&mut self, credential: &str) {
        self.credential = credential.trim().to_string();
    }

    pub fn is_offline(&self) -> bool {
        kipi_ai::is_offline_credential(&self.credential)
    }

    /// One-line summary for `/config`.
    pub fn summary(&self) -> String {
        let key = if self.is_offline() { "not set" } else { "set" };
        format!(
            "model: {} | temperature: {} | max tokens: {} | output: {} | API key: {key}",
            self.generation.model,
            self.generation.temperature,
            self.generation.max_output_tokens,
            self.generation.output_mode,
        )
    }
}

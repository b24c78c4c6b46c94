//! Configuration validation.
//!
//! Checks numeric ranges, the model allow-list, and export naming.
//! All problems are collected into a single error.

use crate::schema::{KipiConfig, SUPPORTED_MODELS};
use kipi_common::{ConfigError, GenerationConfig};

pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 2.0);
pub const MAX_OUTPUT_TOKENS_RANGE: (u32, u32) = (100, 2000);

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &KipiConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    collect_generation(&mut errors, &config.generation);

    // Render constraints
    validate_range_u64(
        &mut errors,
        "render.typing_interval_ms",
        config.render.typing_interval_ms,
        0,
        1000,
    );
    if config.render.cursor.is_whitespace() || config.render.cursor.is_control() {
        errors.push("render.cursor must be a visible character".into());
    }

    // Network constraints
    if !(config.network.api_base.starts_with("http://")
        || config.network.api_base.starts_with("https://"))
    {
        errors.push(format!(
            "network.api_base = {:?} must be an http(s) URL",
            config.network.api_base
        ));
    }
    validate_range_u64(
        &mut errors,
        "network.connect_timeout_secs",
        config.network.connect_timeout_secs,
        1,
        120,
    );
    validate_range_u64(
        &mut errors,
        "network.request_timeout_secs",
        config.network.request_timeout_secs,
        1,
        600,
    );

    // Export constraints
    if config.export.file_prefix.trim().is_empty() {
        errors.push("export.file_prefix must not be empty".into());
    }
    if config.export.file_prefix.contains(['/', '\\']) {
        errors.push(format!(
            "export.file_prefix = {:?} must not contain path separators",
            config.export.file_prefix
        ));
    }

    if config.credentials.api_key_env.trim().is_empty() {
        errors.push("credentials.api_key_env must not be empty".into());
    }

    finish(errors)
}

/// Check a model name against the allow-list.
pub fn validate_model(model: &str) -> Result<(), ConfigError> {
    if SUPPORTED_MODELS.contains(&model) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "generation.model = {model:?} is not supported (choose one of: {})",
            SUPPORTED_MODELS.join(", ")
        )))
    }
}

pub fn validate_temperature(temperature: f64) -> Result<(), ConfigError> {
    let mut errors = Vec::new();
    let (min, max) = TEMPERATURE_RANGE;
    validate_range_f64(&mut errors, "generation.temperature", temperature, min, max);
    finish(errors)
}

pub fn validate_max_output_tokens(max_output_tokens: u32) -> Result<(), ConfigError> {
    let mut errors = Vec::new();
    let (min, max) = MAX_OUTPUT_TOKENS_RANGE;
    validate_range(
        &mut errors,
        "generation.max_output_tokens",
        max_output_tokens,
        min,
        max,
    );
    finish(errors)
}

fn collect_generation(errors: &mut Vec<String>, generation: &GenerationConfig) {
    if let Err(e) = validate_model(&generation.model) {
        errors.push(inner_message(e));
    }
    if let Err(e) = validate_temperature(generation.temperature) {
        errors.push(inner_message(e));
    }
    if let Err(e) = validate_max_output_tokens(generation.max_output_tokens) {
        errors.push(inner_message(e));
    }
}

fn inner_message(err: ConfigError) -> String {
    match err {
        ConfigError::ValidationError(msg) => msg,
        other => other.to_string(),
    }
}

fn finish(errors: Vec<String>) -> Result<(), ConfigError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

fn validate_range_u64(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

fn validate_range_f64(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    // NaN fails both comparisons, so check it explicitly.
    if value.is_nan() || value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

#[cfg(test)]
mod tests;

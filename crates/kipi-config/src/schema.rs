//! Configuration schema.
//!
//! Every section derives `serde(default)` so a partial `config.toml`
//! only needs to mention what it overrides.

use kipi_common::GenerationConfig;
use serde::{Deserialize, Serialize};

/// Models that may be selected for generation.
pub const SUPPORTED_MODELS: &[&str] = &["gemini-2.5-flash", "gemini-2.5-pro", "gemini-2.0-flash"];

/// Where the Gemini API key comes from.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Key written directly in the config file. Empty means "look in the environment".
    pub api_key: String,
    /// Environment variable consulted when `api_key` is empty.
    pub api_key_env: String,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "[REDACTED]"
        };
        f.debug_struct("CredentialsConfig")
            .field("api_key", &key)
            .field("api_key_env", &self.api_key_env)
            .finish()
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_key_env: "GEMINI_API_KEY".into(),
        }
    }
}

/// Typing-effect settings for incremental output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Delay between revealed characters. Zero disables pacing.
    pub typing_interval_ms: u64,
    /// Marker appended to partially revealed text.
    pub cursor: char,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            typing_interval_ms: 10,
            cursor: '▌',
        }
    }
}

/// HTTP settings for the remote model service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub api_base: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
        }
    }
}

/// Transcript export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub directory: String,
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: ".".into(),
            file_prefix: "kipi_chat".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StatsConfig {
    /// Print conversation statistics after every turn.
    pub show: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `kipi=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "kipi=info".into(),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KipiConfig {
    pub credentials: CredentialsConfig,
    pub generation: GenerationConfig,
    pub render: RenderConfig,
    pub network: NetworkConfig,
    pub export: ExportConfig,
    pub stats: StatsConfig,
    pub logging: LoggingConfig,
}

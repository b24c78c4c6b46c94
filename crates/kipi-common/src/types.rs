use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a finished reply is revealed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Character-by-character reveal with a trailing cursor.
    #[default]
    Incremental,
    /// The whole reply at once.
    Batch,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Incremental => write!(f, "incremental"),
            OutputMode::Batch => write!(f, "batch"),
        }
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "incremental" | "stream" | "live" => Ok(OutputMode::Incremental),
            "batch" | "all" => Ok(OutputMode::Batch),
            other => Err(format!(
                "unknown output mode '{other}' (expected incremental or batch)"
            )),
        }
    }
}

/// Generation parameters read at the start of every model call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub output_mode: OutputMode,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            temperature: 0.7,
            max_output_tokens: 1000,
            output_mode: OutputMode::Incremental,
        }
    }
}

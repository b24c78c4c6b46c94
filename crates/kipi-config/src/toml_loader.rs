//! Reading and bootstrapping kipi's `config.toml`.

mod template;

use crate::schema::KipiConfig;
use crate::validation;
use kipi_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use template::default_config_toml;

/// Read a kipi config file.
///
/// Sections and fields the file leaves out take their defaults. A file
/// that parses but fails validation is replaced by the defaults, except
/// that a Gemini API key written in it is carried over.
pub fn load_from_path(path: &Path) -> Result<KipiConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("cannot read {}: {e}", path.display())))?;

    let config: KipiConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "{e}");
        warn!("ignoring config values, keeping only the API key");
        return Ok(defaults_keeping_key(config));
    }

    info!(
        path = %path.display(),
        model = %config.generation.model,
        "config loaded"
    );
    Ok(config)
}

fn defaults_keeping_key(rejected: KipiConfig) -> KipiConfig {
    let mut config = KipiConfig::default();
    config.credentials.api_key = rejected.credentials.api_key;
    config
}

/// Read `kipi/config.toml` under the user's config directory, writing a
/// commented starter file there on first run.
pub fn load_default() -> Result<KipiConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!(path = %path.display(), "first run, writing starter config");
        create_default_config(&path)?;
        return Ok(KipiConfig::default());
    }

    load_from_path(&path)
}

/// `<config dir>/kipi/config.toml`, e.g. `~/.config/kipi/config.toml` on Linux.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("no config directory for this user".into()))?;
    Ok(base.join("kipi").join("config.toml"))
}

/// Write the starter config, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!("cannot create {}: {e}", parent.display()))
        })?;
    }

    std::fs::write(path, default_config_toml())
        .map_err(|e| ConfigError::ParseError(format!("cannot write {}: {e}", path.display())))?;

    info!(path = %path.display(), "starter config written");
    Ok(())
}

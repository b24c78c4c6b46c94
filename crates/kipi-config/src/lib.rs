//! kipi configuration system.
//!
//! TOML-based configuration with validation and credential resolution.
//! All sections use defaults so partial configs work out of the box.

pub mod credentials;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use credentials::resolve_api_key;
pub use schema::{KipiConfig, SUPPORTED_MODELS};

use kipi_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, or from `path` when given.
pub fn load_config(path: Option<&Path>) -> Result<KipiConfig, ConfigError> {
    let config = match path {
        Some(p) => toml_loader::load_from_path(p)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

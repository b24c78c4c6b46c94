//! API key resolution.

use crate::schema::KipiConfig;

/// Resolve the API key from the process environment.
///
/// Resolution order:
/// 1. `override_key` (e.g. the `--api-key` flag), if non-empty
/// 2. `[credentials] api_key` in the config file, if non-empty
/// 3. the environment variable named by `[credentials] api_key_env`
///
/// Returns an empty string when nothing is set; callers treat that as
/// offline mode rather than an error.
pub fn resolve_api_key(config: &KipiConfig, override_key: Option<&str>) -> String {
    resolve_api_key_with(config, override_key, |name| std::env::var(name).ok())
}

/// Same as [`resolve_api_key`] with an explicit environment lookup.
pub fn resolve_api_key_with(
    config: &KipiConfig,
    override_key: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> String {
    if let Some(key) = override_key.map(str::trim).filter(|k| !k.is_empty()) {
        return key.to_string();
    }

    let configured = config.credentials.api_key.trim();
    if !configured.is_empty() {
        return configured.to_string();
    }

    env(&config.credentials.api_key_env)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

use super::*;

#[test]
fn default_config_validates() {
    let config = KipiConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_unsupported_model() {
    let mut config = KipiConfig::default();
    config.generation.model = "gpt-4o".into();
    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("generation.model"));
    assert!(err.to_string().contains("gemini-2.5-flash"));
}

#[test]
fn temperature_bounds_are_inclusive() {
    assert!(validate_temperature(0.0).is_ok());
    assert!(validate_temperature(2.0).is_ok());
    assert!(validate_temperature(-0.1).is_err());
    assert!(validate_temperature(2.1).is_err());
    assert!(validate_temperature(f64::NAN).is_err());
}

#[test]
fn max_output_tokens_bounds_are_inclusive() {
    assert!(validate_max_output_tokens(100).is_ok());
    assert!(validate_max_output_tokens(2000).is_ok());
    assert!(validate_max_output_tokens(99).is_err());
    assert!(validate_max_output_tokens(2001).is_err());
}

#[test]
fn catches_typing_interval_too_large() {
    let mut config = KipiConfig::default();
    config.render.typing_interval_ms = 5000;
    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("render.typing_interval_ms"));
}

#[test]
fn zero_typing_interval_is_allowed() {
    let mut config = KipiConfig::default();
    config.render.typing_interval_ms = 0;
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_blank_cursor() {
    let mut config = KipiConfig::default();
    config.render.cursor = ' ';
    assert!(validate(&config).is_err());
}

#[test]
fn catches_non_http_api_base() {
    let mut config = KipiConfig::default();
    config.network.api_base = "ftp://example.com".into();
    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("network.api_base"));
}

#[test]
fn catches_zero_request_timeout() {
    let mut config = KipiConfig::default();
    config.network.request_timeout_secs = 0;
    assert!(validate(&config).is_err());
}

#[test]
fn catches_prefix_with_path_separator() {
    let mut config = KipiConfig::default();
    config.export.file_prefix = "../escape".into();
    let err = validate(&config).unwrap_err();
    assert!(err.to_string().contains("export.file_prefix"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = KipiConfig::default();
    config.generation.temperature = 9.0;
    config.generation.max_output_tokens = 10;
    let msg = validate(&config).unwrap_err().to_string();
    assert!(msg.contains("generation.temperature"));
    assert!(msg.contains("generation.max_output_tokens"));
}

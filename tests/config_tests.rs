use code_sage::config::{ReasoningDepth, SafetyThreshold, Settings};
use code_sage::error::SageError;
use std::collections::HashMap;

/// Build a map-backed lookup so tests never touch the process environment.
fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_defaults_applied_when_only_api_key_is_set() {
    let settings = Settings::from_lookup(env_from(&[("OPENAI_API_KEY", "sk-test")]))
        .expect("settings should load with only the API key set");

    assert_eq!(settings.api_key, "sk-test");
    assert_eq!(settings.model, "o3-pro");
    assert_eq!(settings.base_url, Settings::DEFAULT_BASE_URL);
    assert!((settings.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(settings.max_tokens, 100_000);
    assert!((settings.top_p - 0.95).abs() < f32::EPSILON);
    assert_eq!(settings.reasoning_depth, ReasoningDepth::Medium);
    assert_eq!(settings.safety_threshold, SafetyThreshold::Medium);
    assert_eq!(settings.log_level, "info");
    assert_eq!(settings.request_timeout_secs, 600);
    assert!(!settings.enable_streaming);
}

#[test]
fn test_explicit_values_override_defaults() {
    let settings = Settings::from_lookup(env_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_MODEL", "o4-mini"),
        ("OPENAI_BASE_URL", "http://localhost:8080/v1"),
        ("TEMPERATURE", "0.7"),
        ("MAX_TOKENS", "4096"),
        ("TOP_P", "0.5"),
        ("REASONING_DEPTH", "high"),
        ("SAFETY_THRESHOLD", "low"),
        ("LOG_LEVEL", "debug"),
        ("REQUEST_TIMEOUT_SECS", "120"),
        ("ENABLE_STREAMING", "true"),
    ]))
    .expect("settings should load");

    assert_eq!(settings.model, "o4-mini");
    assert_eq!(settings.base_url, "http://localhost:8080/v1");
    assert!((settings.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(settings.max_tokens, 4096);
    assert!((settings.top_p - 0.5).abs() < f32::EPSILON);
    assert_eq!(settings.reasoning_depth, ReasoningDepth::High);
    assert_eq!(settings.safety_threshold, SafetyThreshold::Low);
    assert_eq!(settings.log_level, "debug");
    assert_eq!(settings.request_timeout_secs, 120);
    assert!(settings.enable_streaming);
}

#[test]
fn test_missing_api_key_is_a_configuration_error() {
    let err = Settings::from_lookup(env_from(&[("OPENAI_MODEL", "o3-pro")]))
        .expect_err("settings must not load without an API key");

    assert!(matches!(err, SageError::Config(_)));
    assert!(
        err.to_string().contains("OPENAI_API_KEY"),
        "error should name the missing variable: {err}"
    );
}

#[test]
fn test_blank_api_key_is_rejected() {
    let err = Settings::from_lookup(env_from(&[("OPENAI_API_KEY", "   ")]))
        .expect_err("blank API key must be rejected");
    assert!(matches!(err, SageError::Config(_)));
}

#[test]
fn test_invalid_reasoning_depth_is_rejected() {
    let err = Settings::from_lookup(env_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("REASONING_DEPTH", "extreme"),
    ]))
    .expect_err("invalid depth must be rejected");

    assert!(matches!(err, SageError::Config(_)));
    assert!(err.to_string().contains("REASONING_DEPTH"));
}

#[test]
fn test_invalid_safety_threshold_is_rejected() {
    let err = Settings::from_lookup(env_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("SAFETY_THRESHOLD", "paranoid"),
    ]))
    .expect_err("invalid threshold must be rejected");

    assert!(matches!(err, SageError::Config(_)));
    assert!(err.to_string().contains("SAFETY_THRESHOLD"));
}

#[test]
fn test_unparseable_numeric_value_is_rejected() {
    let err = Settings::from_lookup(env_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("TEMPERATURE", "warm"),
    ]))
    .expect_err("unparseable temperature must be rejected");

    assert!(matches!(err, SageError::Config(_)));
    assert!(err.to_string().contains("TEMPERATURE"));
}

#[test]
fn test_enum_values_are_case_sensitive_lowercase() {
    // The accepted set is exactly 'low', 'medium', 'high'.
    let err = Settings::from_lookup(env_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("REASONING_DEPTH", "HIGH"),
    ]))
    .expect_err("uppercase depth must be rejected");
    assert!(matches!(err, SageError::Config(_)));

    let ok = Settings::from_lookup(env_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("REASONING_DEPTH", "high"),
    ]))
    .expect("lowercase depth must parse");
    assert_eq!(ok.reasoning_depth, ReasoningDepth::High);
}

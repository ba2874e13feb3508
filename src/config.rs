use crate::error::SageError;
use crate::log_debug;

use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// How much explicit justification is requested from the model.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReasoningDepth {
    Low,
    Medium,
    High,
}

/// Strictness applied when reviewing code for safety issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SafetyThreshold {
    Low,
    Medium,
    High,
}

/// Immutable process-lifetime settings, read from the environment once at
/// startup and passed by value into every component that needs them.
#[derive(Debug, Clone)]
pub struct Settings {
    /// API key for the completion endpoint
    pub api_key: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Default sampling temperature
    pub temperature: f32,
    /// Default completion token budget
    pub max_tokens: u32,
    /// Default nucleus sampling parameter
    pub top_p: f32,
    /// Default reasoning depth for reasoning-split completions
    pub reasoning_depth: ReasoningDepth,
    /// Strictness for safety reviews
    pub safety_threshold: SafetyThreshold,
    /// Log level applied to the log facade
    pub log_level: String,
    /// Client-side request timeout; the target model class is slow, so the
    /// default allows multi-minute completions
    pub request_timeout_secs: u64,
    /// Whether to request incremental-delta responses by default
    pub enable_streaming: bool,
}

impl Settings {
    /// Default endpoint when `OPENAI_BASE_URL` is not set.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

    /// Load settings from the process environment, failing fast on missing
    /// or invalid values.
    pub fn from_env() -> Result<Self, SageError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from an arbitrary key lookup.
    ///
    /// `from_env` is the production instantiation; tests supply a map-backed
    /// lookup so the fail-fast rules can be exercised without touching the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                SageError::Config("OPENAI_API_KEY environment variable is required".to_string())
            })?;

        let model = lookup("OPENAI_MODEL").unwrap_or_else(|| "o3-pro".to_string());
        let base_url =
            lookup("OPENAI_BASE_URL").unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string());

        let temperature = parse_var(&lookup, "TEMPERATURE", 0.2)?;
        let max_tokens = parse_var(&lookup, "MAX_TOKENS", 100_000)?;
        let top_p = parse_var(&lookup, "TOP_P", 0.95)?;

        let reasoning_depth = match lookup("REASONING_DEPTH") {
            Some(raw) => raw.parse::<ReasoningDepth>().map_err(|_| {
                SageError::Config("REASONING_DEPTH must be 'low', 'medium', or 'high'".to_string())
            })?,
            None => ReasoningDepth::Medium,
        };

        let safety_threshold = match lookup("SAFETY_THRESHOLD") {
            Some(raw) => raw.parse::<SafetyThreshold>().map_err(|_| {
                SageError::Config("SAFETY_THRESHOLD must be 'low', 'medium', or 'high'".to_string())
            })?,
            None => SafetyThreshold::Medium,
        };

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 600)?;
        let enable_streaming = parse_var(&lookup, "ENABLE_STREAMING", false)?;

        let settings = Self {
            api_key,
            model,
            base_url,
            temperature,
            max_tokens,
            top_p,
            reasoning_depth,
            safety_threshold,
            log_level,
            request_timeout_secs,
            enable_streaming,
        };
        log_debug!("Settings loaded for model: {}", settings.model);
        Ok(settings)
    }
}

/// Parse an optional environment value, falling back to `default` when the
/// key is absent and failing with a configuration error when it is present
/// but unparseable.
fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, SageError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| SageError::Config(format!("invalid value for {key}: {raw}"))),
        None => Ok(default),
    }
}

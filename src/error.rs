//! Error taxonomy for Code-Sage.

use thiserror::Error;

/// Errors surfaced by configuration loading, tool dispatch, and the
/// completion client.
///
/// Nothing in this crate retries internally; every variant propagates up to
/// the MCP front-end, which converts it into a textual error payload.
#[derive(Debug, Error)]
pub enum SageError {
    /// Missing or invalid environment configuration. Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// A tool invocation omitted one or more required fields. Raised before
    /// any outbound call is made.
    #[error("Missing required arguments: {}", .0.join(", "))]
    MissingArguments(Vec<String>),

    /// Arguments were present but could not be deserialized into the tool's
    /// input shape.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The completion endpoint returned a non-success HTTP status.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// No response within the configured bound. The target model class can
    /// take minutes per completion, so callers may want to re-issue the
    /// request as a background task rather than waiting inline.
    #[error(
        "request timed out after {timeout_secs}s; the model may still be working, consider re-running this request as a background task"
    )]
    Timeout { timeout_secs: u64 },

    /// Connection-level failure before any HTTP status was received.
    #[error("request failed: {0}")]
    Request(String),

    /// The response arrived but did not carry the expected first-choice
    /// message content.
    #[error("unexpected response shape: {0}")]
    ResponseFormat(String),

    /// No registered tool matches the requested name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

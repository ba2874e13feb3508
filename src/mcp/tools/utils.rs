//! Common utilities for the Code-Sage MCP tools
//!
//! Shared functionality used across the tool implementations: the common
//! tool trait, text-result helpers, and required-field validation.

use crate::config::Settings;
use crate::error::SageError;
use crate::llm::CompletionClient;

use rmcp::model::{Annotated, CallToolResult, Content, RawContent, RawTextContent};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Common trait for all Code-Sage MCP tools
///
/// Each tool validates and renders its own input, selects its sampling
/// parameters, and runs one completion against the injected client.
#[async_trait::async_trait]
pub trait SageTool {
    /// Execute the tool with the provided client and settings
    async fn execute(
        &self,
        client: Arc<dyn CompletionClient>,
        settings: Settings,
    ) -> Result<CallToolResult, SageError>;
}

/// Creates a text result response for tool calls
pub fn create_text_result(text: String) -> CallToolResult {
    CallToolResult {
        content: vec![Content::from(Annotated {
            raw: RawContent::Text(RawTextContent { text }),
            annotations: None,
        })],
        is_error: None,
    }
}

/// Creates a text result flagged as a tool-level error
///
/// The protocol exchange itself still succeeds; the error travels as the
/// result's content.
pub fn create_error_result(text: String) -> CallToolResult {
    CallToolResult {
        content: vec![Content::from(Annotated {
            raw: RawContent::Text(RawTextContent { text }),
            annotations: None,
        })],
        is_error: Some(true),
    }
}

/// Check the raw argument map for the given required fields, collecting
/// every missing name into a single validation error.
///
/// Runs before deserialization and before any outbound call.
pub fn validate_required_args(
    arguments: &Map<String, Value>,
    required: &[&str],
) -> Result<(), SageError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|field| !arguments.contains_key(**field))
        .map(|field| (*field).to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SageError::MissingArguments(missing))
    }
}

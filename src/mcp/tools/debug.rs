//! Debug assistance tool implementation

use crate::config::{ReasoningDepth, Settings};
use crate::error::SageError;
use crate::llm::{ChatMessage, CompletionClient};
use crate::log_debug;
use crate::mcp::tools::utils::{SageTool, create_text_result};
use crate::prompts;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{CallToolResult, Tool};
use rmcp::schemars;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// Debug code issues with analytical reasoning
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct DebugTool {
    /// The code with the bug
    pub code: String,

    /// Error message or unexpected behavior description
    pub error: String,

    /// Expected behavior or output
    pub expected: String,

    /// Programming language
    pub language: String,

    /// Full stack trace if available
    #[serde(default)]
    pub stack_trace: String,

    /// Environment details (OS, versions, etc.)
    #[serde(default)]
    pub environment: String,
}

impl DebugTool {
    pub const NAME: &'static str = "sage_debug";
    pub const REQUIRED_FIELDS: &'static [&'static str] =
        &["code", "error", "expected", "language"];

    /// Returns the tool definition for the debug tool
    pub fn get_tool_definition() -> Tool {
        Tool {
            name: Cow::Borrowed(Self::NAME),
            description: Some(Cow::Borrowed(
                "Debug code issues using analytical reasoning. Provide code, error messages, and expected behavior.",
            )),
            input_schema: cached_schema_for_type::<Self>(),
            annotations: None,
        }
    }

    /// Render the user-content prompt for this invocation
    pub fn render(&self) -> String {
        let mut content = format!(
            "Debug the following {} code:\n\n```{}\n{}\n```\n\nError/Issue: {}\n\nExpected Behavior: {}",
            self.language, self.language, self.code, self.error, self.expected
        );

        if !self.stack_trace.is_empty() {
            content.push_str(&format!("\n\nStack Trace:\n```\n{}\n```", self.stack_trace));
        }
        if !self.environment.is_empty() {
            content.push_str(&format!("\n\nEnvironment: {}", self.environment));
        }

        content.push_str("\n\nIdentify the root cause and provide a solution with corrected code.");
        content
    }
}

#[async_trait::async_trait]
impl SageTool for DebugTool {
    async fn execute(
        &self,
        client: Arc<dyn CompletionClient>,
        _settings: Settings,
    ) -> Result<CallToolResult, SageError> {
        log_debug!("Debugging code with: {:?}", self);

        let messages = vec![
            ChatMessage::system(prompts::get_prompt(Self::NAME)),
            ChatMessage::user(self.render()),
        ];

        // Reasoning mode at full depth for root-cause analysis
        let result = client
            .complete_with_reasoning(messages, Some(ReasoningDepth::High))
            .await?;

        Ok(create_text_result(format!(
            "{}\n\n**Solution:**\n{}",
            result.reasoning, result.answer
        )))
    }
}

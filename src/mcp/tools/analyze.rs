//! Code analysis tool implementation

use crate::config::Settings;
use crate::error::SageError;
use crate::llm::{ChatMessage, CompletionClient, CompletionOptions};
use crate::log_debug;
use crate::mcp::tools::utils::{SageTool, create_text_result};
use crate::prompts;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{CallToolResult, Tool};
use rmcp::schemars;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// Analyze code for quality, performance, and best practices
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct AnalyzeTool {
    /// The code to analyze
    pub code: String,

    /// Programming language of the code
    pub language: String,

    /// Specific aspect to focus on (e.g., performance, security, maintainability)
    #[serde(default)]
    pub focus: String,

    /// Additional context about the codebase or requirements
    #[serde(default)]
    pub context: String,
}

impl AnalyzeTool {
    pub const NAME: &'static str = "sage_analyze";
    pub const REQUIRED_FIELDS: &'static [&'static str] = &["code", "language"];

    /// Returns the tool definition for the code analysis tool
    pub fn get_tool_definition() -> Tool {
        Tool {
            name: Cow::Borrowed(Self::NAME),
            description: Some(Cow::Borrowed(
                "Perform comprehensive code analysis. Identifies issues, suggests improvements, and evaluates code quality.",
            )),
            input_schema: cached_schema_for_type::<Self>(),
            annotations: None,
        }
    }

    /// Render the user-content prompt for this invocation
    pub fn render(&self) -> String {
        let mut content = format!(
            "Analyze the following {} code:\n\n```{}\n{}\n```\n\nLanguage: {}",
            self.language, self.language, self.code, self.language
        );

        if !self.focus.is_empty() {
            content.push_str(&format!("\nFocus Area: {}", self.focus));
        }
        if !self.context.is_empty() {
            content.push_str(&format!("\n\nContext:\n{}", self.context));
        }

        content.push_str("\n\nProvide a comprehensive analysis with specific recommendations.");
        content
    }
}

#[async_trait::async_trait]
impl SageTool for AnalyzeTool {
    async fn execute(
        &self,
        client: Arc<dyn CompletionClient>,
        _settings: Settings,
    ) -> Result<CallToolResult, SageError> {
        log_debug!("Analyzing code with: {:?}", self);

        let messages = vec![
            ChatMessage::system(prompts::get_prompt(Self::NAME)),
            ChatMessage::user(self.render()),
        ];

        // Lower temperature for analytical tasks
        let text = client
            .complete(messages, CompletionOptions::with_temperature(0.1))
            .await?;

        Ok(create_text_result(text))
    }
}

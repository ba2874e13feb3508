//! Code refactoring tool implementation

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

/// Refactor code for improved quality and maintainability
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct RefactorTool {
    /// The code to refactor
    pub code: String,

    /// Programming language
    pub language: String,

    /// Specific refactoring goals (e.g., improve readability, reduce complexity, apply patterns)
    #[serde(default = "default_goals")]
    pub goals: String,

    /// Any constraints or requirements to maintain
    #[serde(default)]
    pub constraints: String,

    /// Design patterns to apply (e.g., Strategy, Factory, Observer)
    #[serde(default)]
    pub target_patterns: String,
}

fn default_goals() -> String {
    "improve overall code quality".to_string()
}

impl RefactorTool {
    pub const NAME: &'static str = "sage_refactor";
    pub const REQUIRED_FIELDS: &'static [&'static str] = &["code", "language"];

    /// Returns the tool definition for the refactoring tool
    pub fn get_tool_definition() -> Tool {
        Tool {
            name: Cow::Borrowed(Self::NAME),
            description: Some(Cow::Borrowed(
                "Refactor code to improve quality, readability, and maintainability while preserving functionality.",
            )),
            input_schema: cached_schema_for_type::<Self>(),
            annotations: None,
        }
    }

    /// Render the user-content prompt for this invocation
    pub fn render(&self) -> String {
        let mut content = format!(
            "Refactor the following {} code:\n\n```{}\n{}\n```\n\nRefactoring Goals: {}",
            self.language, self.language, self.code, self.goals
        );

        if !self.constraints.is_empty() {
            content.push_str(&format!("\nConstraints: {}", self.constraints));
        }
        if !self.target_patterns.is_empty() {
            content.push_str(&format!("\nTarget Patterns: {}", self.target_patterns));
        }

        content.push_str(
            "\n\nProvide the refactored code with explanations for significant changes.\nEnsure the refactored code maintains the same functionality while improving quality.",
        );
        content
    }
}

#[async_trait::async_trait]
impl SageTool for RefactorTool {
    async fn execute(
        &self,
        client: Arc<dyn CompletionClient>,
        _settings: Settings,
    ) -> Result<CallToolResult, SageError> {
        log_debug!("Refactoring code with: {:?}", self);

        let messages = vec![
            ChatMessage::system(prompts::get_prompt(Self::NAME)),
            ChatMessage::user(self.render()),
        ];

        let text = client
            .complete(messages, CompletionOptions::with_temperature(0.2))
            .await?;

        Ok(create_text_result(text))
    }
}

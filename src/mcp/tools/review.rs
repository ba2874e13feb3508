//! Code review tool implementation

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

/// Perform comprehensive code reviews
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ReviewTool {
    /// The code to review
    pub code: String,

    /// Programming language
    pub language: String,

    /// Type of code (e.g., feature, bugfix, refactor)
    #[serde(rename = "type", default = "default_code_type")]
    pub code_type: String,

    /// Pull request description or change context
    #[serde(default)]
    pub pr_description: String,

    /// Specific coding standards to check against
    #[serde(default)]
    pub standards: String,
}

fn default_code_type() -> String {
    "general".to_string()
}

impl ReviewTool {
    pub const NAME: &'static str = "sage_review";
    pub const REQUIRED_FIELDS: &'static [&'static str] = &["code", "language"];

    /// Returns the tool definition for the code review tool
    pub fn get_tool_definition() -> Tool {
        Tool {
            name: Cow::Borrowed(Self::NAME),
            description: Some(Cow::Borrowed(
                "Conduct thorough code reviews. Evaluates correctness, quality, security, and adherence to best practices.",
            )),
            input_schema: cached_schema_for_type::<Self>(),
            annotations: None,
        }
    }

    /// Render the user-content prompt for this invocation
    pub fn render(&self) -> String {
        let mut content = format!(
            "Review the following {} code:\n\n```{}\n{}\n```\n\nCode Type: {}",
            self.language, self.language, self.code, self.code_type
        );

        if !self.pr_description.is_empty() {
            content.push_str(&format!("\n\nPR Description:\n{}", self.pr_description));
        }
        if !self.standards.is_empty() {
            content.push_str(&format!("\n\nCoding Standards:\n{}", self.standards));
        }

        content.push_str(
            "\n\nProvide a detailed review with:\n1. Issues found (with severity: critical, major, minor, suggestion)\n2. Specific line references where applicable\n3. Recommended fixes\n4. Overall assessment",
        );
        content
    }
}

#[async_trait::async_trait]
impl SageTool for ReviewTool {
    async fn execute(
        &self,
        client: Arc<dyn CompletionClient>,
        _settings: Settings,
    ) -> Result<CallToolResult, SageError> {
        log_debug!("Reviewing code with: {:?}", self);

        let messages = vec![
            ChatMessage::system(prompts::get_prompt(Self::NAME)),
            ChatMessage::user(self.render()),
        ];

        let text = client
            .complete(messages, CompletionOptions::with_temperature(0.1))
            .await?;

        Ok(create_text_result(text))
    }
}

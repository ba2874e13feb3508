//! Code generation tool implementation

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

/// Generate production-ready code from a requirements description
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GenerateTool {
    /// Detailed description of what the code should do
    pub requirements: String,

    /// Programming language (e.g., Python, JavaScript, TypeScript, Go, Rust)
    pub language: String,

    /// Additional context, existing code, or constraints
    #[serde(default)]
    pub context: String,

    /// Specific framework to use (e.g., React, Django, Express)
    #[serde(default)]
    pub framework: String,

    /// Coding style preferences (e.g., functional, OOP, procedural)
    #[serde(default)]
    pub style: String,
}

impl GenerateTool {
    pub const NAME: &'static str = "sage_generate";
    pub const REQUIRED_FIELDS: &'static [&'static str] = &["requirements", "language"];

    /// Returns the tool definition for the code generation tool
    pub fn get_tool_definition() -> Tool {
        Tool {
            name: Cow::Borrowed(Self::NAME),
            description: Some(Cow::Borrowed(
                "Generate high-quality code with advanced reasoning. Provide requirements, language, and any specific constraints.",
            )),
            input_schema: cached_schema_for_type::<Self>(),
            annotations: None,
        }
    }

    /// Render the user-content prompt for this invocation
    pub fn render(&self) -> String {
        let mut content = format!(
            "Generate {} code for the following requirements:\n\nRequirements: {}\n\nLanguage: {}",
            self.language, self.requirements, self.language
        );

        if !self.framework.is_empty() {
            content.push_str(&format!("\nFramework: {}", self.framework));
        }
        if !self.style.is_empty() {
            content.push_str(&format!("\nStyle: {}", self.style));
        }
        if !self.context.is_empty() {
            content.push_str(&format!("\n\nAdditional Context:\n{}", self.context));
        }

        content.push_str(
            "\n\nProvide complete, production-ready code with proper error handling and best practices.",
        );
        content
    }
}

#[async_trait::async_trait]
impl SageTool for GenerateTool {
    async fn execute(
        &self,
        client: Arc<dyn CompletionClient>,
        _settings: Settings,
    ) -> Result<CallToolResult, SageError> {
        log_debug!("Generating code with: {:?}", self);

        let messages = vec![
            ChatMessage::system(prompts::get_prompt(Self::NAME)),
            ChatMessage::user(self.render()),
        ];

        // Higher temperature for creative code generation
        let text = client
            .complete(messages, CompletionOptions::with_temperature(0.3))
            .await?;

        Ok(create_text_result(text))
    }
}

//! Deep reasoning tool implementation

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

/// Apply deep reasoning to complex programming problems
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ReasoningTool {
    /// The complex problem or question to solve
    pub problem: String,

    /// Relevant context, constraints, or background information
    #[serde(default)]
    pub context: String,

    /// Specific constraints or requirements
    #[serde(default)]
    pub constraints: String,

    /// Potential solutions or approaches to evaluate
    #[serde(default)]
    pub options: String,

    /// Reasoning depth (default: high)
    #[serde(default)]
    pub depth: Option<ReasoningDepth>,
}

impl ReasoningTool {
    pub const NAME: &'static str = "sage_reasoning";
    pub const REQUIRED_FIELDS: &'static [&'static str] = &["problem"];

    /// Returns the tool definition for the deep reasoning tool
    pub fn get_tool_definition() -> Tool {
        Tool {
            name: Cow::Borrowed(Self::NAME),
            description: Some(Cow::Borrowed(
                "Use advanced reasoning for complex problem-solving, architecture decisions, and technical analysis.",
            )),
            input_schema: cached_schema_for_type::<Self>(),
            annotations: None,
        }
    }

    /// Render the user-content prompt for this invocation
    pub fn render(&self) -> String {
        let mut content = format!(
            "Solve the following problem using deep reasoning:\n\nProblem: {}",
            self.problem
        );

        if !self.context.is_empty() {
            content.push_str(&format!("\n\nContext:\n{}", self.context));
        }
        if !self.constraints.is_empty() {
            content.push_str(&format!("\n\nConstraints:\n{}", self.constraints));
        }
        if !self.options.is_empty() {
            content.push_str(&format!("\n\nPotential Approaches:\n{}", self.options));
        }

        content.push_str(
            "\n\nApply systematic reasoning to:\n1. Analyze the problem thoroughly\n2. Consider multiple approaches\n3. Evaluate trade-offs\n4. Recommend the best solution with justification\n5. Provide implementation guidance",
        );
        content
    }
}

#[async_trait::async_trait]
impl SageTool for ReasoningTool {
    async fn execute(
        &self,
        client: Arc<dyn CompletionClient>,
        _settings: Settings,
    ) -> Result<CallToolResult, SageError> {
        log_debug!("Reasoning about problem with: {:?}", self);

        let messages = vec![
            ChatMessage::system(prompts::get_prompt(Self::NAME)),
            ChatMessage::user(self.render()),
        ];

        let depth = self.depth.unwrap_or(ReasoningDepth::High);
        let result = client.complete_with_reasoning(messages, Some(depth)).await?;

        Ok(create_text_result(format!(
            "**Reasoning Process:**\n{}\n\n**Recommendation:**\n{}",
            result.reasoning, result.answer
        )))
    }
}

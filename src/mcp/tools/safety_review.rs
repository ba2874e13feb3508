//! Safety and security review tool implementation

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

/// Perform security and safety analysis of code
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct SafetyReviewTool {
    /// The code to review for safety and security
    pub code: String,

    /// Programming language
    pub language: String,

    /// Application context (e.g., web app, API, library)
    #[serde(default = "default_context")]
    pub context: String,

    /// Data sensitivity level (e.g., public, internal, confidential)
    #[serde(default)]
    pub sensitivity: String,

    /// Compliance requirements (e.g., OWASP, PCI-DSS, HIPAA)
    #[serde(default)]
    pub compliance: String,
}

fn default_context() -> String {
    "general application".to_string()
}

impl SafetyReviewTool {
    pub const NAME: &'static str = "sage_safety_review";
    pub const REQUIRED_FIELDS: &'static [&'static str] = &["code", "language"];

    /// Returns the tool definition for the safety review tool
    pub fn get_tool_definition() -> Tool {
        Tool {
            name: Cow::Borrowed(Self::NAME),
            description: Some(Cow::Borrowed(
                "Conduct security and safety reviews. Identifies vulnerabilities, security risks, and potential safety issues.",
            )),
            input_schema: cached_schema_for_type::<Self>(),
            annotations: None,
        }
    }

    /// Render the user-content prompt for this invocation
    pub fn render(&self) -> String {
        let mut content = format!(
            "Perform a security and safety review of the following {} code:\n\n```{}\n{}\n```\n\nApplication Context: {}",
            self.language, self.language, self.code, self.context
        );

        if !self.sensitivity.is_empty() {
            content.push_str(&format!("\nData Sensitivity: {}", self.sensitivity));
        }
        if !self.compliance.is_empty() {
            content.push_str(&format!("\nCompliance Requirements: {}", self.compliance));
        }

        content.push_str(
            "\n\nProvide a comprehensive security analysis including:\n1. Vulnerabilities found (with severity: critical, high, medium, low)\n2. Specific security risks and attack vectors\n3. Remediation recommendations with code examples\n4. Best practices to prevent similar issues\n5. Overall security posture assessment",
        );
        content
    }
}

#[async_trait::async_trait]
impl SageTool for SafetyReviewTool {
    async fn execute(
        &self,
        client: Arc<dyn CompletionClient>,
        _settings: Settings,
    ) -> Result<CallToolResult, SageError> {
        log_debug!("Safety-reviewing code with: {:?}", self);

        let messages = vec![
            ChatMessage::system(prompts::get_prompt(Self::NAME)),
            ChatMessage::user(self.render()),
        ];

        // High reasoning depth for security analysis
        let result = client
            .complete_with_reasoning(messages, Some(ReasoningDepth::High))
            .await?;

        Ok(create_text_result(format!(
            "**Security Analysis:**\n{}\n\n**Findings and Recommendations:**\n{}",
            result.reasoning, result.answer
        )))
    }
}

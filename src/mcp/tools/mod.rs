//! MCP tools module for Code-Sage
//!
//! This module contains the seven developer-assistance tools exposed to MCP
//! clients and the handler that advertises and dispatches them.

pub mod analyze;
pub mod debug;
pub mod generate;
pub mod reasoning;
pub mod refactor;
pub mod review;
pub mod safety_review;
pub mod utils;

use crate::config::Settings;
use crate::error::SageError;
use crate::llm::CompletionClient;
use crate::{log_debug, log_error};

use self::utils::{SageTool, create_error_result, validate_required_args};

use rmcp::RoleServer;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
    ServerCapabilities, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{Error, ServerHandler, model::ServerInfo};

use serde_json::{Map, Value};
use std::sync::Arc;

// Re-export all tools for easy importing
pub use self::analyze::AnalyzeTool;
pub use self::debug::DebugTool;
pub use self::generate::GenerateTool;
pub use self::reasoning::ReasoningTool;
pub use self::refactor::RefactorTool;
pub use self::review::ReviewTool;
pub use self::safety_review::SafetyReviewTool;

/// The set of operations Code-Sage exposes, registered once at startup and
/// never mutated.
#[derive(Debug)]
pub enum SageTools {
    Generate(GenerateTool),
    Analyze(AnalyzeTool),
    Debug(DebugTool),
    Refactor(RefactorTool),
    Review(ReviewTool),
    SafetyReview(SafetyReviewTool),
    Reasoning(ReasoningTool),
}

impl SageTools {
    /// Get all tool definitions available in Code-Sage
    pub fn get_tools() -> Vec<Tool> {
        vec![
            GenerateTool::get_tool_definition(),
            AnalyzeTool::get_tool_definition(),
            DebugTool::get_tool_definition(),
            RefactorTool::get_tool_definition(),
            ReviewTool::get_tool_definition(),
            SafetyReviewTool::get_tool_definition(),
            ReasoningTool::get_tool_definition(),
        ]
    }

    /// Resolve a tool name and argument map into a validated tool value.
    ///
    /// Required-field presence is checked against the raw map first, so a
    /// single validation error names every missing field, before
    /// deserialization and before any outbound call.
    pub fn try_from(name: &str, arguments: Map<String, Value>) -> Result<Self, SageError> {
        match name {
            GenerateTool::NAME => {
                validate_required_args(&arguments, GenerateTool::REQUIRED_FIELDS)?;
                Ok(Self::Generate(deserialize_tool(arguments)?))
            }
            AnalyzeTool::NAME => {
                validate_required_args(&arguments, AnalyzeTool::REQUIRED_FIELDS)?;
                Ok(Self::Analyze(deserialize_tool(arguments)?))
            }
            DebugTool::NAME => {
                validate_required_args(&arguments, DebugTool::REQUIRED_FIELDS)?;
                Ok(Self::Debug(deserialize_tool(arguments)?))
            }
            RefactorTool::NAME => {
                validate_required_args(&arguments, RefactorTool::REQUIRED_FIELDS)?;
                Ok(Self::Refactor(deserialize_tool(arguments)?))
            }
            ReviewTool::NAME => {
                validate_required_args(&arguments, ReviewTool::REQUIRED_FIELDS)?;
                Ok(Self::Review(deserialize_tool(arguments)?))
            }
            SafetyReviewTool::NAME => {
                validate_required_args(&arguments, SafetyReviewTool::REQUIRED_FIELDS)?;
                Ok(Self::SafetyReview(deserialize_tool(arguments)?))
            }
            ReasoningTool::NAME => {
                validate_required_args(&arguments, ReasoningTool::REQUIRED_FIELDS)?;
                Ok(Self::Reasoning(deserialize_tool(arguments)?))
            }
            _ => Err(SageError::UnknownTool(name.to_string())),
        }
    }

    /// Execute the resolved tool against the shared client and settings.
    async fn execute(
        self,
        client: Arc<dyn CompletionClient>,
        settings: Settings,
    ) -> Result<CallToolResult, SageError> {
        match self {
            Self::Generate(tool) => tool.execute(client, settings).await,
            Self::Analyze(tool) => tool.execute(client, settings).await,
            Self::Debug(tool) => tool.execute(client, settings).await,
            Self::Refactor(tool) => tool.execute(client, settings).await,
            Self::Review(tool) => tool.execute(client, settings).await,
            Self::SafetyReview(tool) => tool.execute(client, settings).await,
            Self::Reasoning(tool) => tool.execute(client, settings).await,
        }
    }
}

fn deserialize_tool<T: serde::de::DeserializeOwned>(
    arguments: Map<String, Value>,
) -> Result<T, SageError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| SageError::InvalidParameters(e.to_string()))
}

/// The main handler for Code-Sage, providing all MCP tools
#[derive(Clone)]
pub struct SageHandler {
    /// Shared completion client
    pub client: Arc<dyn CompletionClient>,
    /// Immutable process settings
    pub settings: Settings,
}

impl SageHandler {
    /// Create a new Code-Sage handler with the provided dependencies
    pub fn new(client: Arc<dyn CompletionClient>, settings: Settings) -> Self {
        Self { client, settings }
    }

    /// Dispatch one tool invocation.
    ///
    /// Every failure, including an unknown tool name, is logged and
    /// converted into a textual `Error: ...` result so the protocol
    /// exchange itself always succeeds.
    pub async fn handle_tool_call(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> CallToolResult {
        let outcome = match SageTools::try_from(name, arguments) {
            Ok(tool) => {
                tool.execute(Arc::clone(&self.client), self.settings.clone())
                    .await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => result,
            Err(e) => {
                log_error!("Error executing tool {}: {}", name, e);
                create_error_result(format!("Error: {e}"))
            }
        }
    }
}

impl ServerHandler for SageHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Code-Sage bridges this assistant to a remote reasoning model for code generation, analysis, debugging, refactoring, code reviews, security reviews, and deep reasoning."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, Error> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: SageTools::get_tools(),
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, Error> {
        log_debug!("Tool call: {}", request.name);

        // A missing arguments object is treated as an empty map so the
        // validation step can name the missing fields.
        let arguments = request.arguments.clone().unwrap_or_default();

        Ok(self.handle_tool_call(&request.name, arguments).await)
    }
}

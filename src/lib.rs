//! Code-Sage - AI developer-assistance MCP server
//!
//! This library exposes seven LLM-backed developer-assistance tools (code
//! generation, analysis, debugging, refactoring, review, safety review, and
//! deep reasoning) over the Model Context Protocol, forwarding each
//! invocation as a templated prompt to a remote OpenAI-compatible
//! chat-completions endpoint.

#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::format_push_string)] // Performance improvement but stylistic

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod llm;
pub mod logger;
pub mod mcp;
pub mod prompts;

// Re-export important types for easier testing
pub use config::{ReasoningDepth, SafetyThreshold, Settings};
pub use error::SageError;
pub use llm::{ChatMessage, CompletionClient, CompletionOptions, OpenAiClient, ReasoningResponse};

//! Model Context Protocol (MCP) integration for Code-Sage
//!
//! This module contains the implementation of the MCP server that exposes
//! the Code-Sage tools to compatible LLM-powered assistants.

pub mod config;
pub mod server;
pub mod tools;

// Re-export main components
pub use server::serve;

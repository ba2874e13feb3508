//! MCP server implementation for Code-Sage
//!
//! Loads settings, builds the completion client, and serves the tool
//! handler over the selected transport.

use crate::config::Settings;
use crate::llm::{CompletionClient, OpenAiClient};
use crate::log_debug;
use crate::mcp::config::{MCPServerConfig, MCPTransportType};
use crate::mcp::tools::SageHandler;

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use rmcp::transport::sse_server::SseServer;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{stdin, stdout};

/// Serve the MCP server with the provided configuration
pub async fn serve(config: MCPServerConfig) -> Result<()> {
    if config.dev_mode {
        let log_path = format!("code-sage-mcp-{}.log", std::process::id());
        if let Err(e) = crate::logger::set_log_file(&log_path) {
            // For non-stdio transports, we can print this error
            if config.transport != MCPTransportType::StdIO {
                eprintln!("Failed to set up log file: {e}");
            }
            // Continue without file logging
        }
        crate::logger::enable_logging();
    }

    // Stdout carries the protocol for stdio transport; never log there.
    crate::logger::set_log_to_stdout(config.transport != MCPTransportType::StdIO);

    log_debug!("Starting MCP server with config: {:?}", config);

    // Display configuration info if not using stdio transport
    if config.transport != MCPTransportType::StdIO {
        tracing::info!("Starting Code-Sage MCP server with {:?} transport", config.transport);
        if let Some(port) = config.port {
            tracing::info!("Port: {port}");
        }
        if let Some(addr) = &config.listen_address {
            tracing::info!("Listening on: {addr}");
        }
    }

    // Fail fast before serving anything if the environment is incomplete.
    let settings = Settings::from_env()?;
    crate::logger::set_level(&settings.log_level);
    log_debug!("Loaded settings for model: {}", settings.model);

    let client: Arc<dyn CompletionClient> = Arc::new(OpenAiClient::new(&settings));
    let handler = SageHandler::new(client, settings);

    match config.transport {
        MCPTransportType::StdIO => serve_stdio(handler).await,
        MCPTransportType::SSE => {
            let socket_addr = get_socket_addr(&config)?;
            serve_sse(handler, socket_addr).await
        }
    }
}

/// Start the MCP server using `StdIO` transport
async fn serve_stdio(handler: SageHandler) -> Result<()> {
    log_debug!("Starting MCP server with StdIO transport");

    let transport = (stdin(), stdout());

    let server = handler.serve(transport).await?;

    log_debug!("MCP server initialized, waiting for completion");
    let quit_reason = server.waiting().await?;
    log_debug!("MCP server finished: {:?}", quit_reason);

    Ok(())
}

/// Start the MCP server using SSE transport
async fn serve_sse(handler: SageHandler, socket_addr: SocketAddr) -> Result<()> {
    log_debug!("Starting MCP server with SSE transport on {}", socket_addr);

    let server = SseServer::serve(socket_addr).await?;

    let control = server.with_service(move || handler.clone());

    log_debug!("SSE server initialized, waiting for interrupt signal");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl+c signal")?;

    log_debug!("Interrupt signal received, shutting down SSE server");
    control.cancel();

    Ok(())
}

/// Helper function to get a socket address from the configuration
fn get_socket_addr(config: &MCPServerConfig) -> Result<SocketAddr> {
    let listen_address = config.listen_address.as_deref().unwrap_or("127.0.0.1");
    let port = config.port.context("Port is required for SSE transport")?;

    let socket_addr: SocketAddr = format!("{listen_address}:{port}")
        .parse()
        .context("Failed to parse socket address")?;

    Ok(socket_addr)
}

use crate::log_debug;
use crate::mcp;
use crate::mcp::config::{MCPServerConfig, MCPTransportType};

use anyhow::{Result, anyhow};

/// Handle the `serve` command: build the server configuration and hand off
/// to the MCP module.
pub async fn handle_serve_command(
    dev: bool,
    transport: &str,
    port: Option<u16>,
    listen_address: Option<String>,
) -> Result<()> {
    log_debug!(
        "Handling 'serve' command with dev: {}, transport: {}, port: {:?}, listen_address: {:?}",
        dev,
        transport,
        port,
        listen_address
    );

    let transport = match transport.to_lowercase().as_str() {
        "stdio" => MCPTransportType::StdIO,
        "sse" => MCPTransportType::SSE,
        other => return Err(anyhow!("Unsupported transport: {other} (expected 'stdio' or 'sse')")),
    };

    let mut config = MCPServerConfig::default().with_transport(transport);
    if dev {
        config = config.with_dev_mode();
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(addr) = listen_address {
        config = config.with_listen_address(addr);
    }

    mcp::serve(config).await
}

use crate::commands;
use crate::log_debug;
use crate::logger;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand, crate_version};

const LOG_FILE: &str = "code-sage-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "Code-Sage: AI developer-assistance MCP server",
    long_about = "Code-Sage exposes code generation, analysis, debugging, refactoring, review, safety review, and deep reasoning tools to MCP-compatible assistants, backed by a remote reasoning model."
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the MCP server (the default when no subcommand is given)
    #[command(
        about = "Start the MCP server",
        long_about = "Start a Model Context Protocol (MCP) server exposing the Code-Sage tools to AI assistants."
    )]
    Serve {
        /// Enable development mode with more verbose logging
        #[arg(long, help = "Enable development mode with file logging")]
        dev: bool,

        /// Transport to use (stdio or sse)
        #[arg(
            long,
            default_value = "stdio",
            help = "Transport type to use (stdio or sse)"
        )]
        transport: String,

        /// Port for network transports
        #[arg(long, help = "Port to listen on (required for SSE transport)")]
        port: Option<u16>,

        /// Listen address for network transports
        #[arg(long, help = "Address to listen on (e.g., 127.0.0.1)")]
        listen_address: Option<String>,
    },
}

/// Parse arguments and run the selected command.
pub async fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::init().map_err(|e| anyhow!("Failed to initialize logger: {e}"))?;
    if cli.log || cli.log_file.is_some() {
        let path = cli.log_file.clone().unwrap_or_else(|| LOG_FILE.to_string());
        logger::set_log_file(&path)?;
        logger::enable_logging();
    }

    log_debug!("Starting Code-Sage v{}", crate_version!());

    match cli.command {
        Some(Commands::Serve {
            dev,
            transport,
            port,
            listen_address,
        }) => commands::handle_serve_command(dev, &transport, port, listen_address).await,
        None => commands::handle_serve_command(false, "stdio", None, None).await,
    }
}

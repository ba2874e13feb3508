//! Code-Sage binary entry point.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    code_sage::cli::main().await
}

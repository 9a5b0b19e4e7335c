//! BabelNet MCP Server binary.
//!
//! Speaks the Model Context Protocol over stdio, allowing Claude Desktop,
//! Cursor, or any MCP client to query the BabelNet semantic network.
//!
//! Usage:
//!   babelnet-mcp [--api-key KEY] [--base-url URL]
//!
//! Claude Desktop config example:
//! ```json
//! {
//!   "mcpServers": {
//!     "babelnet": {
//!       "command": "babelnet-mcp",
//!       "args": ["--api-key", "your-babelnet-key"]
//!     }
//!   }
//! }
//! ```

use anyhow::{bail, Result};
use babelnet_core::backend::LookupBackend;
use babelnet_core::http::HttpBackend;
use babelnet_mcp::config::Settings;
use babelnet_mcp::tools::BabelNetTools;
use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "babelnet-mcp")]
#[command(about = "BabelNet MCP Server — multilingual semantic network lookups for AI agents")]
struct Args {
    /// BabelNet RESTful API key (overrides the config file and environment).
    #[arg(long)]
    api_key: Option<String>,

    /// Override the API base URL.
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = Settings::load();

    let Some(api_key) = args.api_key.or(settings.api_key) else {
        bail!(
            "missing BabelNet API key: pass --api-key, set BABELNET_API_KEY, \
             or put RESTFUL_KEY in babelnet_conf.yml"
        );
    };

    let backend = match args.base_url.or(settings.base_url) {
        Some(url) => HttpBackend::with_base_url(&api_key, &url),
        None => HttpBackend::new(&api_key),
    };

    // getVersion is the one quota-free call, so it doubles as the startup
    // credential and liveness check.
    match backend.version().await {
        Ok(version) => info!("BabelNet API reachable ({version})"),
        Err(e) => bail!("failed to reach BabelNet API: {e}"),
    }

    info!("each query spends the key's daily request quota (1000 Babelcoins/day)");

    let tools = BabelNetTools::new(Arc::new(backend));
    let service = tools.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use tracing_subscriber::{self, layer::SubscriberExt, util::SubscriberInitExt};

use searchfox_mcp::config::ServerConfig;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Searchfox MCP Server - Model Context Protocol server for searching and reading Mozilla source code"
)]
#[command(
    long_about = "Searchfox MCP Server exposes two tools over the Model Context Protocol: search_code runs literal or regular expression searches against Searchfox and returns a flat, bounded list of matching lines, and get_file returns the raw contents of a file from the GitHub mirror of a Mozilla repository. Supports both stdio and HTTP/SSE interfaces for integration with MCP clients like Claude Desktop."
)]
#[command(propagate_version = true)]
#[command(disable_version_flag = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct UpstreamArgs {
    /// Enable debug logging for troubleshooting and development
    #[arg(short, long)]
    debug: bool,

    /// Searchfox base URL (overrides SEARCHFOX_MCP_BASE_URL, default: https://searchfox.org)
    #[arg(long)]
    searchfox_url: Option<String>,

    /// Raw file content base URL (overrides SEARCHFOX_MCP_RAW_CONTENT_URL, default: https://raw.githubusercontent.com)
    #[arg(long)]
    raw_content_url: Option<String>,

    /// Request timeout in seconds for upstream calls (overrides SEARCHFOX_MCP_REQUEST_TIMEOUT, default: none)
    #[arg(long)]
    request_timeout: Option<u64>,
}

impl UpstreamArgs {
    fn into_config(self) -> Result<ServerConfig> {
        ServerConfig::resolve(
            self.searchfox_url,
            self.raw_content_url,
            self.request_timeout,
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the server in stdin/stdout mode for MCP client integration like Claude Desktop
    Stdio {
        #[command(flatten)]
        upstream: UpstreamArgs,
    },
    /// Run the server with HTTP/SSE interface for web-based access and testing
    Http {
        /// Address to bind the HTTP server to for web interface access
        #[arg(short, long, default_value = "0.0.0.0:8080")]
        address: String,

        #[command(flatten)]
        upstream: UpstreamArgs,
    },
}

/// Logs go to stderr; stdout carries the MCP stream in stdio mode
fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},{}", level, env!("CARGO_CRATE_NAME")).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize rustls crypto provider early to prevent "no process-level CryptoProvider available" panics
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();

    match cli.command {
        Commands::Stdio { upstream } => {
            init_tracing(upstream.debug);
            let config = upstream.into_config()?;

            searchfox_mcp::transport::stdio::run_stdio_server(config).await
        }
        Commands::Http { address, upstream } => {
            init_tracing(upstream.debug);
            let config = upstream.into_config()?;

            run_http_server(address, config).await
        }
    }
}

async fn run_http_server(address: String, config: ServerConfig) -> Result<()> {
    let addr: SocketAddr = address.parse()?;

    tracing::debug!("Searchfox MCP Server listening on {}", addr);
    tracing::info!("Access the Searchfox MCP Server at http://{}/sse", addr);

    let app = searchfox_mcp::transport::sse_server::SseServerApp::new(addr, config);
    app.serve().await?;

    Ok(())
}

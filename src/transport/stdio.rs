use crate::config::ServerConfig;
use crate::tools::SearchfoxTools;
use anyhow::Result;
use rmcp::ServiceExt;
use rmcp::transport::stdio;

/// Runs the MCP server in STDIN/STDOUT mode.
///
/// This mode is used when the server is launched as a subprocess by an MCP client,
/// communicating through standard input/output streams. Logs must go to stderr.
///
/// # Arguments
/// * `config` - Upstream endpoints and request timeout
///
/// # Returns
/// * `Result<()>` - Success when server shuts down cleanly, or error
///
/// # Example
/// ```no_run
/// # use searchfox_mcp::config::ServerConfig;
/// # use searchfox_mcp::transport::stdio::run_stdio_server;
/// # async fn example() -> anyhow::Result<()> {
/// run_stdio_server(ServerConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_stdio_server(config: ServerConfig) -> Result<()> {
    let service = SearchfoxTools::new(config)?;

    service.initialize().await?;

    let server = service.serve(stdio()).await?;

    server.waiting().await?;
    Ok(())
}

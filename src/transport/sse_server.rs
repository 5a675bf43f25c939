use crate::config::ServerConfig;
use crate::tools::SearchfoxTools;
use anyhow::Result;
use rmcp::transport::sse_server::SseServer;
use std::net::SocketAddr;

pub struct SseServerApp {
    bind_addr: SocketAddr,
    config: ServerConfig,
}

impl SseServerApp {
    /// Creates a new SSE server application instance.
    ///
    /// # Arguments
    ///
    /// * `bind_addr` - The socket address to bind the server to
    /// * `config` - Upstream endpoints and request timeout
    pub fn new(bind_addr: SocketAddr, config: ServerConfig) -> Self {
        Self { bind_addr, config }
    }

    /// Starts the SSE server and serves SearchfoxTools over Server-Sent Events.
    ///
    /// This method starts the server and waits for a Ctrl+C signal to shutdown gracefully.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP client cannot be built
    /// - The server fails to bind to the specified address
    pub async fn serve(self) -> Result<()> {
        // One instance is built up front so client construction errors surface before binding
        let service = SearchfoxTools::new(self.config)?;
        service.initialize().await?;

        let sse_server = SseServer::serve(self.bind_addr).await?;
        let cancellation_token = sse_server.with_service(move || service.clone());

        tokio::signal::ctrl_c().await?;

        cancellation_token.cancel();

        Ok(())
    }
}

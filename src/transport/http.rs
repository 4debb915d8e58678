//! HTTP transport with Streamable HTTP support for the MCP server.
//!
//! This transport uses HTTP with SSE streaming responses,
//! which is suitable for web-based MCP integrations. It has no shutdown
//! hook of its own: the process exits from the signal handler.

use crate::db::ConnectionManager;
use crate::error::{DbError, DbResult};
use crate::mcp::TeradataService;
use crate::transport::Transport;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// HTTP transport implementation with Streamable HTTP support.
pub struct HttpTransport {
    connection_manager: Arc<ConnectionManager>,
    /// Host to bind to
    host: String,
    /// Port to bind to
    port: u16,
    /// MCP endpoint path
    endpoint: String,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `connection_manager` - Shared slot read by every tool call
    /// * `host` - Host address to bind to
    /// * `port` - Port to bind to
    /// * `endpoint` - MCP endpoint path (e.g., "/mcp")
    pub fn new(
        connection_manager: Arc<ConnectionManager>,
        host: impl Into<String>,
        port: u16,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            connection_manager,
            host: host.into(),
            port,
            endpoint: endpoint.into(),
        }
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the MCP endpoint path.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn run(&self) -> DbResult<()> {
        let bind_addr = self.bind_addr();
        info!("Starting Teradata MCP Server with HTTP transport on {}", bind_addr);

        let connection_manager = self.connection_manager.clone();
        let service = StreamableHttpService::new(
            move || Ok(TeradataService::new(connection_manager.clone())),
            LocalSessionManager::default().into(),
            Default::default(),
        );

        // Note: nest_service doesn't support root path "/", use fallback_service instead
        let app = if self.endpoint == "/" {
            axum::Router::new().fallback_service(service)
        } else {
            axum::Router::new().nest_service(&self.endpoint, service)
        };

        let listener = TcpListener::bind(&bind_addr).await.map_err(|e| {
            DbError::startup_config(format!("Failed to bind to {}: {}", bind_addr, e))
        })?;

        info!(endpoint = %self.endpoint, "MCP endpoint ready");

        axum::serve(listener, app).await.map_err(|e| {
            error!(error = %e, "HTTP server error");
            DbError::internal(format!("HTTP server error: {}", e))
        })?;

        info!("HTTP server stopped");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(host: &str, port: u16, endpoint: &str) -> HttpTransport {
        HttpTransport::new(Arc::new(ConnectionManager::new()), host, port, endpoint)
    }

    #[test]
    fn test_http_transport_creation() {
        let transport = transport("127.0.0.1", 8080, "/mcp");
        assert_eq!(transport.name(), "http");
        assert_eq!(transport.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_http_transport_custom_endpoint() {
        let transport = transport("0.0.0.0", 3000, "/custom/path");
        assert_eq!(transport.bind_addr(), "0.0.0.0:3000");
        assert_eq!(transport.endpoint(), "/custom/path");
    }

    #[test]
    fn test_http_transport_root_endpoint() {
        assert_eq!(transport("127.0.0.1", 8080, "/").endpoint(), "/");
    }
}

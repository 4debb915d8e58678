//! Stdio transport for the MCP server.
//!
//! This transport uses standard input/output for communication,
//! which is the standard mode for CLI-based MCP integrations.

use crate::db::ConnectionManager;
use crate::error::{DbError, DbResult};
use crate::mcp::TeradataService;
use crate::transport::Transport;
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tracing::{info, warn};

/// Stdio transport implementation.
///
/// This transport reads JSON-RPC messages from stdin and writes
/// responses to stdout. Logs must go to stderr.
pub struct StdioTransport {
    connection_manager: Arc<ConnectionManager>,
}

impl StdioTransport {
    /// Create a new stdio transport with the given connection manager.
    pub fn new(connection_manager: Arc<ConnectionManager>) -> Self {
        Self { connection_manager }
    }
}

impl Transport for StdioTransport {
    async fn run(&self) -> DbResult<()> {
        info!("Starting Teradata MCP Server with stdio transport");

        let service = TeradataService::new(self.connection_manager.clone());

        let running_service = service.serve(stdio()).await.map_err(|e| {
            DbError::internal(format!("Failed to start stdio transport: {}", e))
        })?;

        match running_service.waiting().await {
            Ok(_quit_reason) => {
                info!("Stdio transport completed normally");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Stdio transport error");
                Err(DbError::internal(format!("Stdio transport error: {}", e)))
            }
        }
    }

    fn name(&self) -> &'static str {
        "stdio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdio_transport_creation() {
        let transport = StdioTransport::new(Arc::new(ConnectionManager::new()));
        assert_eq!(transport.name(), "stdio");
    }
}

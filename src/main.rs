//! Teradata MCP Server - Main entry point.
//!
//! This server provides MCP (Model Context Protocol) tools for AI assistants
//! to run SQL against Teradata and explore its `dbc` catalog.

use std::sync::Arc;
use teradata_mcp_server::config::{Config, DATABASE_URI_ENV, TransportMode};
use teradata_mcp_server::db::{ConnectionHandle, ConnectionManager};
use teradata_mcp_server::transport::{
    HttpTransport, StdioTransport, Transport, spawn_signal_handler,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Logs always go to stderr; stdout carries the stdio transport.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse_args();

    // Initialize logging
    init_tracing(&config);

    info!(
        transport = %config.transport,
        "Starting Teradata MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let url = match config.resolve_database_url(std::env::var(DATABASE_URI_ENV).ok()) {
        Ok(url) => url,
        Err(e) => {
            error!(error = %e, "Invalid startup configuration");
            return Err(e.into());
        }
    };

    // A malformed URL or failed connection still yields a running (degraded) server
    let handle = ConnectionHandle::startup(&url, &config.driver_options()).await;
    let connection_manager = Arc::new(ConnectionManager::with_handle(handle));

    spawn_signal_handler();

    // Run the appropriate transport
    let result = match config.transport {
        TransportMode::Stdio => {
            info!("Using stdio transport");
            let transport = StdioTransport::new(connection_manager);
            transport.run().await
        }
        TransportMode::Http => {
            info!(
                host = %config.http_host,
                port = config.http_port,
                endpoint = %config.mcp_endpoint,
                "Using HTTP transport"
            );
            let transport = HttpTransport::new(
                connection_manager,
                &config.http_host,
                config.http_port,
                &config.mcp_endpoint,
            );
            transport.run().await
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}

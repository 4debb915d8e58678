//! Transport layer for the MCP server.
//!
//! This module provides different transport implementations for the MCP protocol:
//! - Stdio: Standard input/output for CLI integration (default)
//! - HTTP: Streamable HTTP for web clients
//!
//! Signal handling lives in `shutdown` and is shared by both transports.

pub mod http;
pub mod shutdown;
pub mod stdio;

pub use http::HttpTransport;
pub use shutdown::{ShutdownSignal, spawn_signal_handler};
pub use stdio::StdioTransport;

use crate::error::DbResult;
use std::future::Future;

/// Trait for MCP transport implementations.
///
/// Transports handle the low-level communication between the MCP server
/// and clients, abstracting away the protocol details.
pub trait Transport: Send + Sync {
    /// Start the transport and begin handling requests.
    ///
    /// This method should block until the transport is shut down.
    fn run(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the name of this transport for logging.
    fn name(&self) -> &'static str;
}

//! Data models for the Teradata MCP Server.
//!
//! This module re-exports all model types used throughout the application.

pub mod connection;
pub mod query;

// Re-export commonly used types
pub use connection::{
    ConnectionUrl, DEFAULT_ODBC_DRIVER, DatabaseType, MASK, redact_credentials,
};
pub use query::{Row, RowSet, ScalarValue, Statement};

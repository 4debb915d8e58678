//! Database abstraction layer.
//!
//! This module provides database access functionality:
//! - Backend connections (SQLite, Teradata over ODBC)
//! - The shared connection handle and its swappable slot
//! - Statement execution
//! - Type mappings and Teradata type codes
//! - Catalog statements

pub mod catalog;
pub mod connection;
pub mod executor;
pub mod handle;
pub mod type_codes;
pub mod types;

pub use connection::{DbConnection, DriverOptions};
pub use handle::{ConnectionHandle, ConnectionManager, Cursor, DEGRADED_STARTUP_MESSAGE};
pub use type_codes::TypeCodeTable;

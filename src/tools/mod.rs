//! MCP tool implementations.
//!
//! This module contains all database tool handlers:
//! - `query`: `execute_sql`, run any SQL statement
//! - `schema`: `list_databases`, `list_objects`, `describe_object`
//! - `resources`: per-table schema resources for the login user's default database
//! - `format`: rendering of row sets and errors into tool responses

pub mod format;
pub mod query;
pub mod resources;
pub mod schema;

pub use format::{NO_RESULTS, ToolResponse};
pub use query::{ExecuteSqlInput, QueryToolHandler};
pub use resources::{ResourceHandler, SchemaResource};
pub use schema::{CatalogToolHandler, DescribeObjectInput, ListObjectsInput};

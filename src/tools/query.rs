//! SQL execution tool.
//!
//! This module implements the `execute_sql` MCP tool. The SQL text is run
//! verbatim: any statement type is allowed, with no parameter binding and no
//! statement restriction.

use crate::db::ConnectionManager;
use crate::error::DbResult;
use crate::models::{RowSet, Statement};
use crate::tools::format::{ToolResponse, format_error, format_outcome};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

/// Placeholder SQL used when the caller omits `sql`.
pub const DEFAULT_SQL: &str = "all";

fn default_sql() -> String {
    DEFAULT_SQL.to_string()
}

/// Input for the execute_sql tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecuteSqlInput {
    /// SQL statement to execute against the Teradata database
    #[serde(default = "default_sql")]
    pub sql: String,
}

/// Handler for free-form SQL execution.
pub struct QueryToolHandler {
    connection_manager: Arc<ConnectionManager>,
}

impl QueryToolHandler {
    /// Create a new query tool handler.
    pub fn new(connection_manager: Arc<ConnectionManager>) -> Self {
        Self { connection_manager }
    }

    /// Handle the execute_sql tool call. Never fails: errors become an
    /// `Error: ...` response.
    pub async fn execute_sql(&self, input: ExecuteSqlInput) -> ToolResponse {
        match self.run(&input.sql).await {
            Ok(outcome) => {
                info!(
                    rows = ?outcome.as_ref().map(RowSet::len),
                    "SQL executed"
                );
                format_outcome(outcome)
            }
            Err(e) => {
                error!(error = %e, "Error executing SQL");
                format_error(&e)
            }
        }
    }

    async fn run(&self, sql: &str) -> DbResult<Option<RowSet>> {
        let mut cursor = self.connection_manager.cursor().await?;
        cursor.execute(&Statement::new(sql)).await
    }
}

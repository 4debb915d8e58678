//! Catalog introspection tools.
//!
//! This module implements the `list_databases`, `list_objects` and
//! `describe_object` MCP tools over the `dbc` catalog views.

use crate::db::ConnectionManager;
use crate::db::catalog;
use crate::error::DbResult;
use crate::models::{RowSet, Statement};
use crate::tools::format::{ToolResponse, format_error, format_rows};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

/// Input for the list_objects tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListObjectsInput {
    /// Database name (case-insensitive)
    pub db_name: String,
}

/// Input for the describe_object tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct DescribeObjectInput {
    /// Database name or LIKE pattern. Empty matches all databases.
    #[serde(default)]
    pub db_name: String,
    /// Table or view name or LIKE pattern. Empty matches all objects.
    #[serde(default)]
    pub obj_name: String,
}

/// Handler for catalog operations.
pub struct CatalogToolHandler {
    connection_manager: Arc<ConnectionManager>,
}

impl CatalogToolHandler {
    /// Create a new catalog tool handler.
    pub fn new(connection_manager: Arc<ConnectionManager>) -> Self {
        Self { connection_manager }
    }

    /// Handle the list_databases tool call.
    pub async fn list_databases(&self) -> ToolResponse {
        self.respond("list_databases", catalog::list_databases_statement())
            .await
    }

    /// Handle the list_objects tool call.
    pub async fn list_objects(&self, input: ListObjectsInput) -> ToolResponse {
        self.respond("list_objects", catalog::list_objects_statement(&input.db_name))
            .await
    }

    /// Handle the describe_object tool call.
    pub async fn describe_object(&self, input: DescribeObjectInput) -> ToolResponse {
        let stmt = catalog::describe_object_statement(&input.db_name, &input.obj_name);
        self.respond("describe_object", stmt).await
    }

    async fn respond(&self, operation: &'static str, stmt: Statement) -> ToolResponse {
        match self.query(&stmt).await {
            Ok(rows) => {
                info!(operation, rows = rows.len(), "Catalog query executed");
                format_rows(&rows)
            }
            Err(e) => {
                error!(operation, error = %e, "Error querying catalog");
                format_error(&e)
            }
        }
    }

    /// Run a catalog statement. A statement without a row set counts as empty.
    async fn query(&self, stmt: &Statement) -> DbResult<RowSet> {
        let mut cursor = self.connection_manager.cursor().await?;
        Ok(cursor.execute(stmt).await?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_object_input_defaults() {
        let input: DescribeObjectInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input.db_name, "");
        assert_eq!(input.obj_name, "");
    }

    #[test]
    fn test_list_objects_input_requires_db_name() {
        assert!(serde_json::from_str::<ListObjectsInput>("{}").is_err());
        let input: ListObjectsInput = serde_json::from_str(r#"{"db_name": "sales"}"#).unwrap();
        assert_eq!(input.db_name, "sales");
    }

    #[tokio::test]
    async fn test_catalog_tools_without_connection_are_errors() {
        let handler = CatalogToolHandler::new(Arc::new(ConnectionManager::new()));
        let expected = "Error: Database connection is not available";

        assert_eq!(handler.list_databases().await.text(), expected);
        assert_eq!(
            handler
                .list_objects(ListObjectsInput {
                    db_name: "sales".to_string()
                })
                .await
                .text(),
            expected
        );
        let response = handler
            .describe_object(DescribeObjectInput::default())
            .await;
        assert!(response.is_error());
        assert_eq!(response.text(), expected);
    }
}

//! Integration tests for the table schema resources.
//!
//! Tests verify that:
//! - Resources list the tables and views of the login user's default database
//! - Reading a resource returns its columns with decoded types as JSON
//! - Malformed URIs and missing connections are reported as errors

mod common;

use common::{catalog_manager, catalog_manager_as};
use serde_json::{Value, json};
use std::sync::Arc;
use teradata_mcp_server::db::ConnectionManager;
use teradata_mcp_server::error::DbError;
use teradata_mcp_server::tools::{ResourceHandler, SchemaResource};

fn uris(resources: &[SchemaResource]) -> Vec<&str> {
    resources.iter().map(|r| r.uri.as_str()).collect()
}

#[tokio::test]
async fn test_list_resources_for_default_database() {
    let handler = ResourceHandler::new(catalog_manager_as("alice").await);
    let resources = handler.list().await.unwrap();

    assert_eq!(
        uris(&resources),
        vec![
            "teradata:///orders/schema",
            "teradata:///customers/schema",
            "teradata:///order_summary/schema",
        ]
    );
    assert_eq!(resources[0].name, "\"orders\" database schema");
}

#[tokio::test]
async fn test_list_resources_follows_user() {
    let handler = ResourceHandler::new(catalog_manager_as("BOB").await);
    let resources = handler.list().await.unwrap();
    assert_eq!(uris(&resources), vec!["teradata:///orders/schema"]);
}

#[tokio::test]
async fn test_list_resources_without_login_user_is_empty() {
    let handler = ResourceHandler::new(catalog_manager().await);
    assert!(handler.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_read_resource_decodes_column_types() {
    let handler = ResourceHandler::new(catalog_manager_as("alice").await);
    let text = handler.read("teradata:///orders/schema").await.unwrap();

    let columns: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        columns,
        json!([
            {"ColumnName": "order_id", "CType": "INTEGER"},
            {"ColumnName": "customer", "CType": "VARCHAR"},
            {"ColumnName": "order_date", "CType": "DATE"},
            {"ColumnName": "shape", "CType": "UNKNOWN(ZZ)"},
        ])
    );
}

#[tokio::test]
async fn test_read_resource_is_scoped_to_default_database() {
    // BOB's default database is Other, whose orders table has a single column
    let handler = ResourceHandler::new(catalog_manager_as("bob").await);
    let text = handler.read("teradata://tdhost/ORDERS/schema").await.unwrap();

    let columns: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(columns, json!([{"ColumnName": "id", "CType": "BIGINT"}]));
}

#[tokio::test]
async fn test_read_unknown_table_is_empty() {
    let handler = ResourceHandler::new(catalog_manager_as("alice").await);
    let text = handler.read("teradata:///nope/schema").await.unwrap();
    assert_eq!(text, "[]");
}

#[tokio::test]
async fn test_read_malformed_uri_is_invalid_input() {
    let handler = ResourceHandler::new(catalog_manager_as("alice").await);
    let err = handler.read("teradata:///orders/rows").await.unwrap_err();
    assert!(matches!(err, DbError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_read_without_connection_fails() {
    let handler = ResourceHandler::new(Arc::new(ConnectionManager::new()));
    let err = handler.read("teradata:///orders/schema").await.unwrap_err();
    assert!(matches!(err, DbError::ConnectionUnavailable));
    assert_eq!(err.to_string(), "Database connection is not available");
}

//! Shared fixtures: an in-memory SQLite database with an attached `dbc`
//! schema that mirrors the Teradata catalog views used by the tools.

#![allow(dead_code)]

use std::sync::Arc;
use teradata_mcp_server::db::{ConnectionHandle, ConnectionManager, DriverOptions};
use teradata_mcp_server::models::{ConnectionUrl, Statement};

const CATALOG_SCHEMA: &[&str] = &[
    "ATTACH DATABASE ':memory:' AS dbc",
    "CREATE TABLE dbc.DatabasesV (DataBaseName VARCHAR(128), DBKind CHAR(1), OwnerName VARCHAR(128), CommentString VARCHAR(255))",
    "CREATE TABLE dbc.TablesV (DataBaseName VARCHAR(128), TableName VARCHAR(128), TableKind CHAR(1))",
    "CREATE TABLE dbc.ColumnsVX (DataBaseName VARCHAR(128), TableName VARCHAR(128), ColumnName VARCHAR(128), ColumnType CHAR(2))",
    "CREATE TABLE dbc.UsersV (UserName VARCHAR(128), DefaultDatabase VARCHAR(128))",
];

const CATALOG_ROWS: &[&str] = &[
    "INSERT INTO dbc.DatabasesV VALUES ('Sales', 'D', 'ALICE', 'Sales data mart')",
    "INSERT INTO dbc.DatabasesV VALUES ('alice', 'U', 'DBC', NULL)",
    "INSERT INTO dbc.DatabasesV VALUES ('PDCRDATA', 'D', 'PDCRADM', 'Performance data')",
    "INSERT INTO dbc.DatabasesV VALUES ('Archive', 'X', 'ALICE', 'Odd kind')",
    "INSERT INTO dbc.TablesV VALUES ('Sales', 'orders', 'T')",
    "INSERT INTO dbc.TablesV VALUES ('Sales', 'customers', 'T')",
    "INSERT INTO dbc.TablesV VALUES ('Sales', 'order_summary', 'V')",
    "INSERT INTO dbc.TablesV VALUES ('Sales', 'load_orders', 'P')",
    "INSERT INTO dbc.TablesV VALUES ('Other', 'orders', 'T')",
    "INSERT INTO dbc.ColumnsVX VALUES ('Sales', 'orders', 'order_id', 'I ')",
    "INSERT INTO dbc.ColumnsVX VALUES ('Sales', 'orders', 'customer', 'CV')",
    "INSERT INTO dbc.ColumnsVX VALUES ('Sales', 'orders', 'order_date', 'DA')",
    "INSERT INTO dbc.ColumnsVX VALUES ('Sales', 'orders', 'shape', 'ZZ')",
    "INSERT INTO dbc.ColumnsVX VALUES ('Sales', 'customers', 'name', 'CF')",
    "INSERT INTO dbc.ColumnsVX VALUES ('Other', 'orders', 'id', 'I8')",
    "INSERT INTO dbc.UsersV VALUES ('ALICE', 'Sales')",
    "INSERT INTO dbc.UsersV VALUES ('BOB', 'Other')",
];

/// A connection to a fresh in-memory database.
pub async fn memory_handle() -> ConnectionHandle {
    let url = ConnectionUrl::parse("sqlite::memory:").unwrap();
    ConnectionHandle::connect(&url, &DriverOptions::default())
        .await
        .unwrap()
}

/// A connected manager over an in-memory database without catalog tables.
pub async fn memory_manager() -> Arc<ConnectionManager> {
    Arc::new(ConnectionManager::with_handle(memory_handle().await))
}

/// A connected manager whose `dbc` schema is empty.
pub async fn empty_catalog_manager() -> Arc<ConnectionManager> {
    let manager = memory_manager().await;
    run_all(&manager, CATALOG_SCHEMA).await;
    manager
}

/// A connected manager with the standard catalog fixture loaded.
pub async fn catalog_manager() -> Arc<ConnectionManager> {
    let manager = empty_catalog_manager().await;
    run_all(&manager, CATALOG_ROWS).await;
    manager
}

/// Like [`catalog_manager`], logged in as `user`.
pub async fn catalog_manager_as(user: &str) -> Arc<ConnectionManager> {
    let manager = Arc::new(ConnectionManager::with_handle(
        memory_handle().await.with_user(user),
    ));
    run_all(&manager, CATALOG_SCHEMA).await;
    run_all(&manager, CATALOG_ROWS).await;
    manager
}

/// Execute each statement in order, panicking on failure.
pub async fn run_all(manager: &ConnectionManager, statements: &[&str]) {
    for sql in statements {
        let mut cursor = manager.cursor().await.unwrap();
        cursor
            .execute(&Statement::new(*sql))
            .await
            .unwrap_or_else(|e| panic!("fixture statement failed: {sql}: {e}"));
    }
}

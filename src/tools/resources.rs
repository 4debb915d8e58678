//! Table schema resources.
//!
//! Every table and view in the login user's default database is exposed as
//! a `teradata://<host>/<table>/schema` resource. Reading one returns the
//! table's columns and decoded Teradata types as JSON.

use crate::db::ConnectionManager;
use crate::db::catalog;
use crate::error::{DbError, DbResult};
use crate::models::{RowSet, ScalarValue};
use crate::tools::format::format_value;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

pub const RESOURCE_SCHEME: &str = "teradata";

/// Final path segment of every schema resource URI.
pub const SCHEMA_PATH: &str = "schema";

pub const JSON_MIME_TYPE: &str = "application/json";

/// One listed table or view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaResource {
    pub uri: String,
    pub name: String,
}

impl SchemaResource {
    fn new(host: &str, table: &str) -> Self {
        Self {
            uri: schema_uri(host, table),
            name: format!("\"{table}\" database schema"),
        }
    }
}

/// Handler for the schema resources.
pub struct ResourceHandler {
    connection_manager: Arc<ConnectionManager>,
}

impl ResourceHandler {
    pub fn new(connection_manager: Arc<ConnectionManager>) -> Self {
        Self { connection_manager }
    }

    /// List the tables and views in the login user's default database.
    ///
    /// A connection without a known login user has no resources.
    pub async fn list(&self) -> DbResult<Vec<SchemaResource>> {
        let handle = self.connection_manager.current().await;
        let mut cursor = handle.cursor().await?;
        let Some(user) = handle.user() else {
            debug!("No login user known, listing no schema resources");
            return Ok(Vec::new());
        };

        let rows = cursor
            .execute(&catalog::list_default_objects_statement(user))
            .await?
            .unwrap_or_default();
        let host = handle.host().unwrap_or_default();

        let resources: Vec<SchemaResource> = rows
            .rows
            .iter()
            .filter_map(|row| match row.first() {
                Some(ScalarValue::Text(table)) => Some(SchemaResource::new(host, table.trim_end())),
                _ => None,
            })
            .collect();
        info!(resources = resources.len(), "Listed schema resources");
        Ok(resources)
    }

    /// Read the column listing behind a schema resource URI.
    pub async fn read(&self, uri: &str) -> DbResult<String> {
        let table = parse_schema_uri(uri)?;
        let handle = self.connection_manager.current().await;
        let mut cursor = handle.cursor().await?;
        let user = handle
            .user()
            .ok_or_else(|| DbError::invalid_input(format!("Unknown resource: {uri}")))?;

        let rows = cursor
            .execute(&catalog::describe_default_object_statement(user, &table))
            .await?
            .unwrap_or_default();
        debug!(table = %table, columns = rows.len(), "Read schema resource");
        rows_to_json(&rows)
    }
}

/// Build the resource URI for `table`.
pub fn schema_uri(host: &str, table: &str) -> String {
    format!(
        "{RESOURCE_SCHEME}://{host}/{}/{SCHEMA_PATH}",
        urlencoding::encode(table)
    )
}

/// Extract the table name from a schema resource URI.
pub fn parse_schema_uri(uri: &str) -> DbResult<String> {
    let invalid = || DbError::invalid_input(format!("Invalid resource URI: {uri}"));

    let url = Url::parse(uri).map_err(|_| invalid())?;
    if url.scheme() != RESOURCE_SCHEME {
        return Err(invalid());
    }
    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.collect())
        .unwrap_or_default();
    match segments.as_slice() {
        [table, SCHEMA_PATH] if !table.is_empty() => urlencoding::decode(table)
            .map(|t| t.into_owned())
            .map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn rows_to_json(rows: &RowSet) -> DbResult<String> {
    let objects: Vec<Value> = rows
        .rows
        .iter()
        .map(|row| {
            let object: Map<String, Value> = rows
                .columns
                .iter()
                .cloned()
                .zip(row.iter().map(json_value))
                .collect();
            Value::Object(object)
        })
        .collect();
    serde_json::to_string_pretty(&objects)
        .map_err(|e| DbError::internal(format!("Failed to serialize resource: {e}")))
}

fn json_value(value: &ScalarValue) -> Value {
    match value {
        ScalarValue::Null => Value::Null,
        ScalarValue::Text(s) => Value::String(s.clone()),
        ScalarValue::Integer(v) => Value::from(*v),
        ScalarValue::Float(v) => Value::from(*v),
        ScalarValue::Decimal(v) => Value::String(v.clone()),
        ScalarValue::Date(d) => Value::String(d.to_string()),
        ScalarValue::Time(t) => Value::String(t.to_string()),
        ScalarValue::Timestamp(ts) => Value::String(ts.to_string()),
        ScalarValue::Binary(_) => Value::String(format_value(value)),
    }
}

//! MCP service implementation using rmcp.
//!
//! This module defines the TeradataService struct with the four database
//! tools exposed via the MCP protocol using the rmcp framework's macros.
//! Every tool answers with a single text item; failures set `isError`
//! instead of surfacing as protocol errors.
//!
//! Schema resources are served alongside the tools. Unlike tools, resource
//! failures are protocol errors.

use crate::db::ConnectionManager;
use crate::error::DbError;
use crate::tools::query::{ExecuteSqlInput, QueryToolHandler};
use crate::tools::resources::{JSON_MIME_TYPE, ResourceHandler, SchemaResource};
use crate::tools::schema::{CatalogToolHandler, DescribeObjectInput, ListObjectsInput};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{
        AnnotateAble, CallToolResult, Implementation, ListResourcesResult,
        PaginatedRequestParam, ProtocolVersion, RawResource, ReadResourceRequestParam,
        ReadResourceResult, Resource, ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use tracing::error;
use std::sync::Arc;

/// Name advertised in the MCP handshake.
pub const SERVER_NAME: &str = "teradata-mcp";

#[derive(Clone)]
pub struct TeradataService {
    /// Slot holding the current connection handle
    connection_manager: Arc<ConnectionManager>,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl TeradataService {
    /// Create a new TeradataService instance.
    ///
    /// # Arguments
    ///
    /// * `connection_manager` - Shared slot read by every tool call
    pub fn new(connection_manager: Arc<ConnectionManager>) -> Self {
        Self {
            connection_manager,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl TeradataService {
    #[tool(
        description = "Execute any SQL query against the Teradata database.\nReturns the rows as a list of tuples, or \"No results\" for statements without a result set (DDL, DML)."
    )]
    async fn execute_sql(
        &self,
        Parameters(input): Parameters<ExecuteSqlInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = QueryToolHandler::new(self.connection_manager.clone());
        Ok(handler.execute_sql(input).await.into())
    }

    #[tool(
        description = "List all databases in the Teradata system.\nReturns database name, kind (User or DataBase) and comment."
    )]
    async fn list_databases(&self) -> Result<CallToolResult, McpError> {
        let handler = CatalogToolHandler::new(self.connection_manager.clone());
        Ok(handler.list_databases().await.into())
    }

    #[tool(
        description = "List tables and views in a database.\nThe database name is matched case-insensitively."
    )]
    async fn list_objects(
        &self,
        Parameters(input): Parameters<ListObjectsInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = CatalogToolHandler::new(self.connection_manager.clone());
        Ok(handler.list_objects(input).await.into())
    }

    #[tool(
        description = "Show the columns of a table or view with their Teradata data types.\nBoth names accept SQL LIKE patterns and match case-insensitively; an empty name matches everything."
    )]
    async fn describe_object(
        &self,
        Parameters(input): Parameters<DescribeObjectInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = CatalogToolHandler::new(self.connection_manager.clone());
        Ok(handler.describe_object(input).await.into())
    }
}

fn to_resource(resource: SchemaResource) -> Resource {
    let mut raw = RawResource::new(resource.uri, resource.name);
    raw.mime_type = Some(JSON_MIME_TYPE.to_string());
    raw.no_annotation()
}

fn resource_error(operation: &'static str, err: DbError) -> McpError {
    error!(operation, error = %err, "Error serving schema resource");
    match err {
        DbError::InvalidInput { message } => McpError::invalid_params(message, None),
        other => McpError::internal_error(other.to_string(), None),
    }
}

#[tool_handler]
impl ServerHandler for TeradataService {
    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        async move {
            let handler = ResourceHandler::new(self.connection_manager.clone());
            let resources = handler
                .list()
                .await
                .map_err(|e| resource_error("list_resources", e))?;
            Ok(ListResourcesResult::with_all_items(
                resources.into_iter().map(to_resource).collect(),
            ))
        }
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        async move {
            let handler = ResourceHandler::new(self.connection_manager.clone());
            let text = handler
                .read(&request.uri)
                .await
                .map_err(|e| resource_error("read_resource", e))?;
            Ok(ReadResourceResult {
                contents: vec![ResourceContents::TextResourceContents {
                    uri: request.uri,
                    mime_type: Some(JSON_MIME_TYPE.to_string()),
                    text,
                    meta: None,
                }],
            })
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_owned(),
                title: Some("Teradata MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tools for exploring and querying a Teradata database.\n\
                \n\
                ## Workflow\n\
                1. Call `list_databases` to see the databases and users on the system\n\
                2. Call `list_objects` with a `db_name` to list its tables and views\n\
                3. Call `describe_object` with `db_name` and `obj_name` to see columns and types\n\
                4. Use `execute_sql` to run any SQL statement\n\
                \n\
                ## Resources\n\
                Each table and view in your default database is a `teradata://<host>/<table>/schema` resource listing its columns and types as JSON.\n\
                \n\
                ## Notes\n\
                - Results are returned as a list of row tuples, e.g. `[('orders',), ('customers',)]`\n\
                - Name matching in the catalog tools is case-insensitive\n\
                - `describe_object` accepts `%` and `_` wildcards; an empty name matches everything\n\
                - Failures are returned as text starting with `Error: `"
                    .to_string(),
            ),
        }
    }
}

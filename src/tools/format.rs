//! Output formatting for MCP tools.
//!
//! Every tool answers with exactly one text content item. Row sets render
//! as a bracketed list of row tuples:
//!
//! ```text
//! [('SALES', 'DataBase', 'Sales data mart'), ('ALICE', 'User', NULL)]
//! ```
//!
//! A one-column row keeps the trailing comma of a one-element tuple, e.g.
//! `[('orders',)]`.

use crate::error::DbError;
use crate::models::{RowSet, ScalarValue};
use rmcp::model::{CallToolResult, Content};

/// Payload for statements that produced no row set.
pub const NO_RESULTS: &str = "No results";

/// Prefix of every error payload.
pub const ERROR_PREFIX: &str = "Error: ";

/// Outcome of a tool call, before it is wrapped into an MCP result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResponse {
    Success(String),
    Error(String),
}

impl ToolResponse {
    /// The single text payload.
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn into_call_tool_result(self) -> CallToolResult {
        match self {
            Self::Success(text) => CallToolResult::success(vec![Content::text(text)]),
            Self::Error(text) => CallToolResult::error(vec![Content::text(text)]),
        }
    }
}

impl From<ToolResponse> for CallToolResult {
    fn from(response: ToolResponse) -> Self {
        response.into_call_tool_result()
    }
}

/// Wrap a row set.
pub fn format_rows(rows: &RowSet) -> ToolResponse {
    ToolResponse::Success(render_rows(rows))
}

/// Wrap the result of a statement that may not have produced a row set.
pub fn format_outcome(outcome: Option<RowSet>) -> ToolResponse {
    match outcome {
        Some(rows) => format_rows(&rows),
        None => ToolResponse::Success(NO_RESULTS.to_string()),
    }
}

/// Wrap a failure as `Error: <message>`.
pub fn format_error(err: &DbError) -> ToolResponse {
    ToolResponse::Error(format!("{ERROR_PREFIX}{err}"))
}

pub fn render_rows(rows: &RowSet) -> String {
    let mut out = String::from("[");
    for (i, row) in rows.rows.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('(');
        for (j, value) in row.iter().enumerate() {
            if j > 0 {
                out.push_str(", ");
            }
            out.push_str(&format_value(value));
        }
        if row.len() == 1 {
            out.push(',');
        }
        out.push(')');
    }
    out.push(']');
    out
}

/// Render a single value as a SQL-style literal.
pub fn format_value(value: &ScalarValue) -> String {
    match value {
        ScalarValue::Null => "NULL".to_string(),
        ScalarValue::Text(s) => quote(s),
        ScalarValue::Integer(v) => v.to_string(),
        ScalarValue::Decimal(v) => v.clone(),
        ScalarValue::Float(v) => format!("{v:?}"),
        ScalarValue::Date(d) => quote(&d.format("%Y-%m-%d").to_string()),
        ScalarValue::Time(t) => quote(&t.to_string()),
        ScalarValue::Timestamp(ts) => quote(&ts.to_string()),
        ScalarValue::Binary(bytes) => {
            let mut hex = String::with_capacity(bytes.len() * 2 + 3);
            hex.push_str("X'");
            for b in bytes {
                hex.push_str(&format!("{b:02X}"));
            }
            hex.push('\'');
            hex
        }
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

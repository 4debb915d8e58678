//! Query-related data models.
//!
//! This module defines the statement sent to the database and the typed
//! row set that comes back.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// A single column value as returned by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Text(String),
    Integer(i64),
    /// Exact textual form, e.g. "1234.50"
    Decimal(String),
    Float(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Binary(Vec<u8>),
}

/// One result row, in column order.
pub type Row = Vec<ScalarValue>;

/// Ordered rows produced by a statement, in the order the engine yielded them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl RowSet {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// SQL text plus positional (`?`) text parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<String>,
}

impl Statement {
    /// Create a statement without parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Add a positional parameter.
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }
}

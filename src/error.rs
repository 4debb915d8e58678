//! Error types for the Teradata MCP Server.
//!
//! This module defines all error types using `thiserror` for ergonomic error handling.
//! Per-call errors never escape a tool handler: they are rendered into an
//! `Error: ...` response. Only [`DbError::StartupConfig`] stops the process.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// No usable connection URL could be resolved at startup.
    #[error("{message}")]
    StartupConfig { message: String },

    #[error("Database connection is not available")]
    ConnectionUnavailable,

    /// Message is redacted by the caller before construction.
    #[error("Connection failed: {message}")]
    Connection { message: String, suggestion: String },

    /// Raw driver message, shown to the caller verbatim.
    #[error("{message}")]
    Statement {
        message: String,
        /// e.g., "42000" for a syntax error
        sql_state: Option<String>,
    },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DbError {
    /// Create a startup configuration error.
    pub fn startup_config(message: impl Into<String>) -> Self {
        Self::StartupConfig {
            message: message.into(),
        }
    }

    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a statement execution error with optional SQL state.
    pub fn statement(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::Statement {
            message: message.into(),
            sql_state,
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Connection { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }

    /// Replace any credential fragments in the message using `redact`.
    ///
    /// Statement errors are left untouched.
    pub fn redacted(self, redact: impl Fn(&str) -> String) -> Self {
        match self {
            Self::Connection {
                message,
                suggestion,
            } => Self::Connection {
                message: redact(&message),
                suggestion,
            },
            Self::StartupConfig { message } => Self::StartupConfig {
                message: redact(&message),
            },
            other => other,
        }
    }
}

/// Convert sqlx errors to DbError.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => DbError::connection(
                msg.to_string(),
                "Check the connection string format and credentials",
            ),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                DbError::statement(db_err.message(), code)
            }
            sqlx::Error::Io(io_err) => DbError::connection(
                format!("I/O error: {}", io_err),
                "Check that the database file or server is reachable",
            ),
            sqlx::Error::Tls(tls_err) => DbError::connection(
                format!("TLS error: {}", tls_err),
                "Verify TLS configuration and certificates",
            ),
            sqlx::Error::Protocol(msg) => DbError::connection(
                format!("Protocol error: {}", msg),
                "Check database server compatibility",
            ),
            sqlx::Error::ColumnDecode { index, source } => {
                DbError::internal(format!("Failed to decode column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => DbError::internal(format!("Decode error: {}", source)),
            sqlx::Error::WorkerCrashed => DbError::internal("Database worker crashed"),
            other => DbError::statement(other.to_string(), None),
        }
    }
}

/// Convert ODBC driver errors to DbError.
#[cfg(feature = "teradata")]
impl From<odbc_api::Error> for DbError {
    fn from(err: odbc_api::Error) -> Self {
        DbError::statement(err.to_string(), None)
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;

//! Shared connection handle.
//!
//! A [`ConnectionHandle`] owns zero or one live connection. Tool calls never
//! touch the connection directly: they ask the [`ConnectionManager`] for the
//! current handle, then for a [`Cursor`], which holds the connection's lock
//! until it is dropped. Acquisition and execution therefore form a single
//! critical section and at most one statement is in flight at a time.

use crate::db::connection::{DbConnection, DriverOptions};
use crate::db::executor;
use crate::error::{DbError, DbResult};
use crate::models::{ConnectionUrl, RowSet, Statement, redact_credentials};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{info, warn};

/// Logged when the server starts without a working connection.
pub const DEGRADED_STARTUP_MESSAGE: &str = "The MCP server will start but database operations will fail until a valid connection is established.";

/// Zero-or-one live database connection.
#[derive(Debug, Default)]
pub struct ConnectionHandle {
    connection: Option<Arc<Mutex<DbConnection>>>,
    /// Login user; its default database scopes the schema resources
    user: Option<String>,
    host: Option<String>,
}

impl ConnectionHandle {
    /// A handle with no connection. Every cursor request fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a handle from the raw startup URL, tolerating failure.
    ///
    /// A URL that cannot be parsed is treated like one that cannot be
    /// opened: the (redacted) error is logged and the handle is empty.
    pub async fn startup(raw_url: &str, options: &DriverOptions) -> Self {
        match parse_startup_url(raw_url) {
            Ok(url) => Self::construct(Some(&url), options).await,
            Err(e) => {
                warn!(error = %e, "Could not parse database URL");
                warn!("{}", DEGRADED_STARTUP_MESSAGE);
                Self::empty()
            }
        }
    }

    /// Build a handle, tolerating connection failure.
    ///
    /// An absent URL or a failed connection attempt yields an empty handle;
    /// the failure is logged (redacted) and the server keeps running.
    pub async fn construct(url: Option<&ConnectionUrl>, options: &DriverOptions) -> Self {
        let Some(url) = url else {
            return Self::empty();
        };

        match Self::connect(url, options).await {
            Ok(handle) => {
                info!("Successfully connected to database and initialized connection");
                handle
            }
            Err(e) => {
                warn!(
                    db_type = %url.db_type(),
                    url = %url,
                    error = %e,
                    suggestion = e.suggestion().unwrap_or_default(),
                    "Could not connect to database"
                );
                warn!("{}", DEGRADED_STARTUP_MESSAGE);
                Self::empty()
            }
        }
    }

    /// Open a connection for `url`, failing on any error.
    pub async fn connect(url: &ConnectionUrl, options: &DriverOptions) -> DbResult<Self> {
        let connection = DbConnection::open(url, options).await?;
        Ok(Self {
            connection: Some(Arc::new(Mutex::new(connection))),
            user: url.username(),
            host: url.host().map(str::to_string),
        })
    }

    /// Override the login user, e.g. for SQLite URLs that carry none.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn is_available(&self) -> bool {
        self.connection.is_some()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Lock the connection and return a cursor over it.
    ///
    /// Waits while another cursor is alive.
    pub async fn cursor(&self) -> DbResult<Cursor> {
        let connection = self
            .connection
            .as_ref()
            .ok_or(DbError::ConnectionUnavailable)?;
        let guard = Arc::clone(connection).lock_owned().await;
        Ok(Cursor { guard })
    }
}

fn parse_startup_url(raw: &str) -> DbResult<ConnectionUrl> {
    ConnectionUrl::parse(raw).map_err(|e| e.redacted(redact_credentials))
}

/// Exclusive access to the connection for one statement.
pub struct Cursor {
    guard: OwnedMutexGuard<DbConnection>,
}

impl Cursor {
    /// Execute `stmt`; `None` means the statement produced no row set.
    pub async fn execute(&mut self, stmt: &Statement) -> DbResult<Option<RowSet>> {
        executor::execute(&mut self.guard, stmt).await
    }
}

/// The swappable slot holding the current [`ConnectionHandle`].
///
/// Handlers read the slot on every call, so a replacement is visible to the
/// next call without restarting the server.
#[derive(Debug, Clone, Default)]
pub struct ConnectionManager {
    current: Arc<RwLock<Arc<ConnectionHandle>>>,
}

impl ConnectionManager {
    /// Create a manager holding an empty handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager holding `handle`.
    pub fn with_handle(handle: ConnectionHandle) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(handle))),
        }
    }

    /// The handle at the time of the call.
    pub async fn current(&self) -> Arc<ConnectionHandle> {
        Arc::clone(&*self.current.read().await)
    }

    /// Install `handle`, returning the one it replaces.
    pub async fn replace(&self, handle: ConnectionHandle) -> Arc<ConnectionHandle> {
        let mut current = self.current.write().await;
        std::mem::replace(&mut *current, Arc::new(handle))
    }

    pub async fn is_available(&self) -> bool {
        self.current().await.is_available()
    }

    /// Get a cursor from the current handle.
    pub async fn cursor(&self) -> DbResult<Cursor> {
        self.current().await.cursor().await
    }
}

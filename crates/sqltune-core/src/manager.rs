//! Lazily established, reusable connection to a single database
//!
//! The manager owns at most one `Connection`. The session is opened on first
//! use, reopened if it has been closed, and closed explicitly by the caller.
//! Nothing is retried: each transition makes exactly one attempt.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{Connection, ConnectionFactory, QueryResult, Result, TuneError, Value};

/// Lifecycle of the managed session
#[derive(Clone, Default)]
pub enum ConnectionState {
    /// No session, or the previous one has been closed
    #[default]
    Disconnected,
    /// An open session
    Connected(Arc<dyn Connection>),
}

impl ConnectionState {
    /// Returns the open connection, treating a closed one as disconnected
    fn live(&self) -> Option<&Arc<dyn Connection>> {
        match self {
            Self::Connected(conn) if !conn.is_closed() => Some(conn),
            _ => None,
        }
    }

    /// Returns the state name for logging
    pub fn as_str(&self) -> &'static str {
        match self.live() {
            Some(_) => "connected",
            None => "disconnected",
        }
    }
}

impl std::fmt::Debug for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owns the session used by the analyzer
pub struct ConnectionManager {
    state: Mutex<ConnectionState>,
    factory: Arc<dyn ConnectionFactory>,
}

impl ConnectionManager {
    /// Create a manager in the `Disconnected` state
    pub fn new<F: ConnectionFactory>(factory: F) -> Self {
        Self {
            state: Mutex::new(ConnectionState::Disconnected),
            factory: Arc::new(factory),
        }
    }

    /// Open a session unless one is already open.
    ///
    /// Returns the open connection. A failure to open is reported as
    /// `TuneError::Connection` and the state stays `Disconnected`.
    pub async fn ensure_connected(&self) -> Result<Arc<dyn Connection>> {
        let mut state = self.state.lock().await;
        if let Some(conn) = state.live() {
            return Ok(conn.clone());
        }

        if matches!(*state, ConnectionState::Connected(_)) {
            tracing::debug!("managed connection was closed; reconnecting");
        }

        let conn = self.factory.create().await.map_err(|err| match err {
            TuneError::Connection(_) => err,
            other => TuneError::Connection(other.to_string()),
        })?;

        tracing::info!(driver = conn.driver_name(), "database connection established");
        *state = ConnectionState::Connected(conn.clone());
        Ok(conn)
    }

    /// Run a parameterized read query, connecting first if needed.
    ///
    /// The state lock is released before the query runs so several queries
    /// can share the session concurrently.
    pub async fn execute_query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let conn = self.ensure_connected().await?;
        conn.query(sql, params).await.map_err(|err| match err {
            TuneError::Connection(_) | TuneError::Query(_) => err,
            other => TuneError::Query(other.to_string()),
        })
    }

    /// Close the session if one is open. Safe to call repeatedly.
    pub async fn close(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        let previous = std::mem::take(&mut *state);
        match previous.live() {
            Some(conn) => {
                tracing::info!(driver = conn.driver_name(), "closing database connection");
                conn.close().await
            }
            None => Ok(()),
        }
    }

    /// Returns true if a session is currently open
    pub async fn is_connected(&self) -> bool {
        self.state.lock().await.live().is_some()
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> ConnectionState {
        self.state.lock().await.clone()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager").finish_non_exhaustive()
    }
}

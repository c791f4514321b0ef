//! Connection and connection factory traits

use crate::{QueryResult, Result, Value};
use async_trait::async_trait;
use std::sync::Arc;

/// A live database session.
///
/// Implementations must be safe to query from several tasks at once; the
/// analyzer issues its per-table metadata queries concurrently.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "mysql")
    fn driver_name(&self) -> &str;

    /// Execute a read query with positional parameters and return its rows.
    ///
    /// Parameters are bound by the driver, never interpolated into `sql`.
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Close the session and wait for the server to acknowledge it
    async fn close(&self) -> Result<()>;

    /// Check if the connection is closed
    fn is_closed(&self) -> bool;
}

/// Factory trait for creating connections
///
/// Used by `ConnectionManager` to open a session on first use and to reopen
/// one after it has been closed.
#[async_trait]
pub trait ConnectionFactory: Send + Sync + 'static {
    /// Create a new connection
    async fn create(&self) -> Result<Arc<dyn Connection>>;
}

#[async_trait]
impl<T: ConnectionFactory> ConnectionFactory for Arc<T> {
    async fn create(&self) -> Result<Arc<dyn Connection>> {
        (**self).create().await
    }
}

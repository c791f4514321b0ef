//! Connection factory for the connection manager

use async_trait::async_trait;
use sqltune_core::{Connection, ConnectionConfig, ConnectionFactory, Result};
use std::sync::Arc;

use crate::MySqlConnection;

/// Opens `MySqlConnection`s from a fixed configuration
#[derive(Debug, Clone)]
pub struct MySqlConnectionFactory {
    config: ConnectionConfig,
}

impl MySqlConnectionFactory {
    /// Create a factory for the given credentials
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ConnectionFactory for MySqlConnectionFactory {
    #[tracing::instrument(skip(self), fields(host = %self.config.host, database = %self.config.database))]
    async fn create(&self) -> Result<Arc<dyn Connection>> {
        let conn = MySqlConnection::connect(&self.config).await.map_err(|e| {
            tracing::error!(error = %e, "failed to connect to MySQL database");
            e
        })?;
        Ok(Arc::new(conn))
    }
}

//! Connection configuration

use crate::{Result, TuneError};
use serde::{Deserialize, Serialize};

/// Default MySQL port
pub const DEFAULT_PORT: u16 = 3306;

/// Default pool ceiling; one connection per concurrent metadata query
pub const DEFAULT_MAX_CONNECTIONS: usize = 5;

/// Credentials and sizing for a single database
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Username
    pub user: String,
    /// Password (may be empty)
    pub password: String,
    /// Database to analyze
    pub database: String,
    /// Upper bound on pooled sessions
    pub max_connections: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            user: String::new(),
            password: String::new(),
            database: String::new(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl ConnectionConfig {
    /// Create a configuration from the four required credential values
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Sets the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the pool ceiling (at least one connection)
    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    /// Checks that every required value is present.
    ///
    /// All missing values are reported together. The password may be empty.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("host", self.host.trim().is_empty()),
            ("user", self.user.trim().is_empty()),
            ("database", self.database.trim().is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, is_missing)| is_missing.then_some(name))
        .collect();

        if !missing.is_empty() {
            return Err(TuneError::Configuration(format!(
                "missing required connection settings: {}",
                missing.join(", ")
            )));
        }
        if self.port == 0 {
            return Err(TuneError::Configuration("port must be non-zero".into()));
        }
        Ok(())
    }
}

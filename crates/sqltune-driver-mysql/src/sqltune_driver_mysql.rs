//! MySQL/MariaDB driver implementation

mod connection;
mod factory;

pub use connection::{MySqlConnection, escape_identifier};
pub use factory::MySqlConnectionFactory;

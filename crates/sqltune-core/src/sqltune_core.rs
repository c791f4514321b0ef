//! sqltune core - shared abstractions for the schema advisor
//!
//! This crate provides the types every other sqltune crate depends on:
//!
//! - `Connection` / `ConnectionFactory` - traits implemented by database drivers
//! - `ConnectionManager` - lazily established, reusable connection with an
//!   explicit `Disconnected`/`Connected` state
//! - `ConnectionConfig` - credentials and pool sizing
//! - Common types like `Value`, `Row` and `QueryResult`

mod config;
mod connection;
mod error;
mod manager;
mod types;

pub use config::*;
pub use connection::*;
pub use error::*;
pub use manager::*;
pub use types::*;

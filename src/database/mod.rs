//! Database module
//!
//! Connection handling and migrations for PostgreSQL.

pub mod connection;

pub use connection::{run_migrations, DatabaseConnection};

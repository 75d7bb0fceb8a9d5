//! # gatehouse-database
//!
//! SQLite connection management, schema migrations, and the
//! [`UserDirectory`] abstraction with its sqlx-backed implementation.

pub mod connection;
pub mod directory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use directory::UserDirectory;
pub use repositories::UserRepository;

//! Durable storage.
//!
//! A single SQLite table used as a key-value store for data that must
//! outlive the session (currently the lookup history).

pub mod kv;
pub mod migrations;
pub mod pool;

// Re-export commonly used items
pub use kv::{KeyValueStore, SqliteStore};
pub use migrations::run_migrations;
pub use pool::{init_db_pool_with_path, init_memory_pool};

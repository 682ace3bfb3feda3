//! ip_intel library: IP intelligence lookups with session history
//!
//! This library turns an IP address into WHOIS-style intelligence (owning
//! organization, network block, geolocation, contacts, a short summary and
//! citation sources) by asking a search-grounded completion service for a
//! schema-constrained JSON answer. A [`SessionController`] wraps the gateway
//! with address validation, single-flight lookups and a bounded recent-lookup
//! history persisted in SQLite.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ip_intel::initialization::init_client;
//! use ip_intel::{Config, GatewayClient, GeminiCompleter, SessionController, SqliteStore};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let completer = GeminiCompleter::from_config(init_client()?, &config);
//! let store = SqliteStore::open(&config.db_path).await?;
//! let session =
//!     SessionController::initialize(GatewayClient::new(Arc::new(completer)), Arc::new(store)).await;
//!
//! session.set_query("23.90.66.53");
//! session.submit().await;
//! if let Some(result) = session.state().result {
//!     println!("{}: {}", result.ip, result.summary);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod intel;
pub mod session;
pub mod storage;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{LookupError, LookupStats, StorageError, ValidationError};
pub use intel::{Completer, GatewayClient, GeminiCompleter, LookupResult};
pub use session::{HistoryEntry, SessionController, SessionState, SubmitOutcome};
pub use storage::{KeyValueStore, SqliteStore};

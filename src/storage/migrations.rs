//! Database migration management.

use sqlx::{Pool, Sqlite};

use crate::error_handling::StorageError;

/// Runs the migrations embedded from the `migrations/` directory.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), StorageError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

//! SQLite connection pool.
//!
//! The database holds the `tower_sessions` table only. Each session record
//! carries the shopper's cart slot, so carts persist across restarts without
//! a schema of their own. The session store creates its table at startup.

use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Create a SQLite connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string, e.g. `sqlite://cartwheel.db?mode=rwc`
///
/// # Errors
///
/// Returns `sqlx::Error` if the database cannot be opened.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
}

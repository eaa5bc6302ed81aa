//! Connection pool management for the SQLite backend.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info, instrument};

use crate::config::Config;

/// Creates a new SQLite connection pool from the given configuration.
///
/// In-memory databases vanish with their connection, so they get exactly one
/// connection that is never reaped.
#[instrument(skip(config), fields(url = %config.database_url))]
pub async fn create_pool(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let connect_options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true);

    let mut options = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_millis(config.database_acquire_timeout_ms));

    let pool_size = if config.is_in_memory() {
        options = options
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
        1
    } else {
        config.database_max_connections
    };

    info!(pool_size, "Creating SQLite connection pool");

    let pool = options
        .max_connections(pool_size)
        .connect_with(connect_options)
        .await?;

    debug!("SQLite connection pool created successfully");

    Ok(pool)
}

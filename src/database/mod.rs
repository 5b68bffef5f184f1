//! Database connection management and the row-source seam.

pub mod filters;
pub mod row_source;

pub use row_source::{MatrixFilters, PgRowSource, RowSource};

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::{mask_database_url, DatabaseConfig};

/// Build the connection pool. The pool is handed to [`PgRowSource`] by the
/// caller; nothing in this crate holds a global connection.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        "Connecting to database: {}",
        mask_database_url(&config.database_url)
    );

    let mut pool_options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connection_timeout);

    if let Some(idle_timeout) = config.idle_timeout {
        pool_options = pool_options.idle_timeout(idle_timeout);
    }

    if let Some(max_lifetime) = config.max_lifetime {
        pool_options = pool_options.max_lifetime(max_lifetime);
    }

    let pool = pool_options.connect(&config.database_url).await.map_err(|e| {
        warn!("Failed to connect to database: {}", e);
        e
    })?;

    info!(
        "Database pool ready (max {} connections)",
        config.max_connections
    );
    Ok(pool)
}

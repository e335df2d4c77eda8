//! Connection helpers for the warehouse database.

use shared_utils::config::DatabaseConfig;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Opens a small connection pool against the configured database.
///
/// The stages are single-threaded and sequential; the pool exists for
/// connection reuse, not parallelism.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(4)
        .connect(&config.url())
        .await
}

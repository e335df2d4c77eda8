//! Create-if-absent DDL for the landing and analytics schemas.

use sqlx::PgPool;
use tracing::debug;

/// Ensures the `raw` schema and the landing table exist.
pub async fn ensure_landing_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    debug!("ensuring raw.github_issues exists");
    sqlx::query("CREATE SCHEMA IF NOT EXISTS raw")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS raw.github_issues (
            id SERIAL PRIMARY KEY,
            execution_date DATE NOT NULL,
            raw_data JSONB,
            created_at TIMESTAMP DEFAULT NOW()
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Ensures the `analytics` schema, the user dimension, and the issue fact
/// table exist. The fact table references the dimension, so the dimension is
/// created first.
pub async fn ensure_analytics_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    debug!("ensuring analytics.dim_users and analytics.fact_issues exist");
    sqlx::query("CREATE SCHEMA IF NOT EXISTS analytics")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS analytics.dim_users (
            user_id BIGINT PRIMARY KEY,
            login TEXT NOT NULL,
            type TEXT,
            url TEXT,
            updated_at TIMESTAMP DEFAULT NOW()
        )",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS analytics.fact_issues (
            issue_id BIGINT PRIMARY KEY,
            user_id BIGINT REFERENCES analytics.dim_users(user_id),
            state TEXT,
            title TEXT,
            comments_count INT,
            created_at TIMESTAMP,
            execution_date DATE,
            loaded_at TIMESTAMP DEFAULT NOW()
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}

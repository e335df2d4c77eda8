//! Projection of the landing rows into the analytics tables.

use issue_extractor::models::batch::BatchDate;
use sqlx::PgPool;
use tracing::info;

use crate::errors::Error;

// DISTINCT ON keyed by the user id: a user appearing under several issues in
// one date must collapse to a single row before the upsert, or the ON
// CONFLICT clause would be asked to touch the same row twice.
const UPSERT_DIM_USERS: &str = "\
INSERT INTO analytics.dim_users (user_id, login, type, url)
SELECT DISTINCT ON ((raw_data->'user'->>'id')::bigint)
    (raw_data->'user'->>'id')::bigint,
    raw_data->'user'->>'login',
    raw_data->'user'->>'type',
    raw_data->'user'->>'url'
FROM raw.github_issues
WHERE execution_date = $1
ORDER BY (raw_data->'user'->>'id')::bigint
ON CONFLICT (user_id) DO UPDATE
SET login = EXCLUDED.login, updated_at = NOW()";

const INSERT_FACT_ISSUES: &str = "\
INSERT INTO analytics.fact_issues
    (issue_id, user_id, state, title, comments_count, created_at, execution_date)
SELECT
    (raw_data->>'id')::bigint,
    (raw_data->'user'->>'id')::bigint,
    raw_data->>'state',
    raw_data->>'title',
    (raw_data->>'comments')::int,
    (raw_data->>'created_at')::timestamp,
    $1
FROM raw.github_issues
WHERE execution_date = $1";

/// Row counts written by one transform run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransformSummary {
    /// Dimension rows inserted or updated.
    pub users_upserted: u64,
    /// Fact rows inserted for the date.
    pub facts_inserted: u64,
}

/// Projects the landing rows for `date` into the analytics tables.
///
/// The dimension upsert runs before the fact insert so every fact row's
/// `user_id` already exists when the foreign key is checked. Everything runs
/// in one transaction: a malformed field (non-numeric id, invalid timestamp)
/// fails the cast, rolls the whole date back, and leaves no partial fact
/// state.
pub async fn run_transform(pool: &PgPool, date: BatchDate) -> Result<TransformSummary, Error> {
    info!(date = %date, "transforming landing rows");

    let mut tx = pool.begin().await?;

    let users_upserted = sqlx::query(UPSERT_DIM_USERS)
        .bind(date.as_naive())
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM analytics.fact_issues WHERE execution_date = $1")
        .bind(date.as_naive())
        .execute(&mut *tx)
        .await?;
    let facts_inserted = sqlx::query(INSERT_FACT_ISSUES)
        .bind(date.as_naive())
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    info!(date = %date, users_upserted, facts_inserted, "transform complete");
    Ok(TransformSummary {
        users_upserted,
        facts_inserted,
    })
}

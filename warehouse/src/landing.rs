//! Idempotent load of the raw document into the landing table.

use issue_extractor::io::sink::RawStore;
use issue_extractor::models::batch::BatchDate;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;

use crate::errors::Error;

// Bulk insert preserving the document's record order; WITH ORDINALITY keeps
// the array position available to sort on.
const INSERT_LANDING: &str = "\
INSERT INTO raw.github_issues (execution_date, raw_data)
SELECT $1, elem.value
FROM jsonb_array_elements($2::jsonb) WITH ORDINALITY AS elem(value, idx)
ORDER BY elem.idx";

/// Replaces the landing rows for `date` with the records of its raw
/// document.
///
/// Delete and insert run in one transaction, so a failed run leaves the
/// previously committed rows rather than a half-loaded date. A missing raw
/// document is a no-op, not an error.
///
/// Returns the number of rows inserted.
pub async fn load_raw(
    pool: &PgPool,
    store: &dyn RawStore,
    date: BatchDate,
) -> Result<u64, Error> {
    let Some(records) = store.read(date).await? else {
        info!(date = %date, "no raw document found, skipping load");
        return Ok(0);
    };

    info!(date = %date, count = records.len(), "replacing landing rows");

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM raw.github_issues WHERE execution_date = $1")
        .bind(date.as_naive())
        .execute(&mut *tx)
        .await?;
    let inserted = sqlx::query(INSERT_LANDING)
        .bind(date.as_naive())
        .bind(Value::Array(records))
        .execute(&mut *tx)
        .await?
        .rows_affected();
    tx.commit().await?;

    info!(date = %date, inserted, "load complete");
    Ok(inserted)
}

#![allow(dead_code)]

use async_trait::async_trait;
use issue_extractor::io::sink::{RawStore, SinkError};
use issue_extractor::models::batch::BatchDate;
use serde_json::{Value, json};
use sqlx::PgPool;

/// Opens a pool against the database named by `TEST_DATABASE_URL`, or `None`
/// when the variable is unset (the caller should skip the test).
pub async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    Some(PgPool::connect(&url).await.expect("connect test database"))
}

/// In-memory stand-in for the object store: serves a fixed document (or
/// "no document") to the loader.
pub struct MemoryStore(pub Option<Vec<Value>>);

#[async_trait]
impl RawStore for MemoryStore {
    async fn write(&self, date: BatchDate, _records: &[Value]) -> Result<String, SinkError> {
        Ok(format!("memory/dt={date}"))
    }

    async fn read(&self, _date: BatchDate) -> Result<Option<Vec<Value>>, SinkError> {
        Ok(self.0.clone())
    }
}

/// A minimal upstream issue record with the fields the transform projects.
pub fn issue(id: i64, user_id: i64, login: &str) -> Value {
    json!({
        "id": id,
        "state": "open",
        "title": format!("issue {id}"),
        "comments": 2,
        "created_at": "2023-01-15T08:30:00Z",
        "user": {
            "id": user_id,
            "login": login,
            "type": "User",
            "url": format!("https://api.github.com/users/{login}")
        }
    })
}

pub async fn landing_count(pool: &PgPool, date: BatchDate) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM raw.github_issues WHERE execution_date = $1")
        .bind(date.as_naive())
        .fetch_one(pool)
        .await
        .expect("count landing rows")
}

pub async fn fact_count(pool: &PgPool, date: BatchDate) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM analytics.fact_issues WHERE execution_date = $1")
        .bind(date.as_naive())
        .fetch_one(pool)
        .await
        .expect("count fact rows")
}

/// Removes any state a previous run of the same test left behind.
pub async fn reset_date(pool: &PgPool, date: BatchDate) {
    sqlx::query("DELETE FROM raw.github_issues WHERE execution_date = $1")
        .bind(date.as_naive())
        .execute(pool)
        .await
        .expect("reset landing rows");
    sqlx::query("DELETE FROM analytics.fact_issues WHERE execution_date = $1")
        .bind(date.as_naive())
        .execute(pool)
        .await
        .expect("reset fact rows");
}

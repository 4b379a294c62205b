use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::{QueryStore, StoreError};

/// Inbound contact-form submission. Write-once: the API exposes no update or
/// delete for queries, and no owner is recorded.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewQuery {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

pub struct PgQueryStore {
    pool: PgPool,
}

impl PgQueryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, name, email, subject, message, created_at";

#[async_trait]
impl QueryStore for PgQueryStore {
    async fn find_all(&self) -> Result<Vec<Query>, StoreError> {
        let sql = format!("SELECT {} FROM queries ORDER BY created_at", COLUMNS);
        let rows = sqlx::query_as::<_, Query>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn insert(&self, new: NewQuery) -> Result<Query, StoreError> {
        let sql = format!(
            "INSERT INTO queries (name, email, subject, message) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query_as::<_, Query>(&sql)
            .bind(new.name)
            .bind(new.email)
            .bind(new.subject)
            .bind(new.message)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

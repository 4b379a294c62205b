use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::{ArticleStore, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub heading: String,
    pub content: String,
    pub image: Option<String>,
    /// Principal id recorded at creation; never mutated afterwards.
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewArticle {
    pub heading: String,
    pub content: String,
    pub image: Option<String>,
    #[serde(skip)]
    pub owner_id: String,
}

/// Patch set for an article. `None` means "leave the stored value alone";
/// there is no way to unset a field, matching the merge semantics of update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleChanges {
    pub heading: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
}

pub struct PgArticleStore {
    pool: PgPool,
}

impl PgArticleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, heading, content, image, owner_id, created_at, updated_at";

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn find_all(&self) -> Result<Vec<Article>, StoreError> {
        let sql = format!("SELECT {} FROM articles ORDER BY created_at", COLUMNS);
        let rows = sqlx::query_as::<_, Article>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Article>, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let sql = format!("SELECT {} FROM articles WHERE id = $1", COLUMNS);
        let row = sqlx::query_as::<_, Article>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, new: NewArticle) -> Result<Article, StoreError> {
        let sql = format!(
            "INSERT INTO articles (heading, content, image, owner_id) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query_as::<_, Article>(&sql)
            .bind(new.heading)
            .bind(new.content)
            .bind(new.image)
            .bind(new.owner_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: &str,
        changes: ArticleChanges,
    ) -> Result<Option<Article>, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let sql = format!(
            "UPDATE articles SET \
               heading = COALESCE($2, heading), \
               content = COALESCE($3, content), \
               image = COALESCE($4, image), \
               updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query_as::<_, Article>(&sql)
            .bind(id)
            .bind(changes.heading)
            .bind(changes.content)
            .bind(changes.image)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

use async_trait::async_trait;

pub mod article;
pub mod memory;
pub mod pg;
pub mod query;

pub use article::{Article, ArticleChanges, NewArticle};
pub use query::{NewQuery, Query};

/// Fault raised by a store backend. Handlers never forward these to clients;
/// each operation logs the fault and maps it to a generic response.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),
}

/// Persistence operations for articles. One trait object per process,
/// injected into the handlers through `AppState`.
///
/// Identifiers are store-assigned UUIDs; an id that does not parse as a UUID
/// simply locates nothing and is reported the same way as a missing record.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Article>, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Article>, StoreError>;
    async fn insert(&self, new: NewArticle) -> Result<Article, StoreError>;
    /// Merge only the supplied fields into the record; absent fields keep
    /// their stored values. Returns `None` when no record matches.
    async fn update(&self, id: &str, changes: ArticleChanges)
        -> Result<Option<Article>, StoreError>;
    /// Permanent removal. Returns `false` when no record matched.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Persistence operations for contact queries. Queries are write-once: no
/// update or delete exists.
#[async_trait]
pub trait QueryStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Query>, StoreError>;
    async fn insert(&self, new: NewQuery) -> Result<Query, StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Article, ArticleChanges, ArticleStore, NewArticle, NewQuery, Query, QueryStore, StoreError};

/// In-memory article store with the same semantics as the Postgres one.
/// Used when no DATABASE_URL is configured and throughout the test suite.
#[derive(Default)]
pub struct MemoryArticleStore {
    rows: RwLock<Vec<Article>>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn find_all(&self) -> Result<Vec<Article>, StoreError> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Article>, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        Ok(self.rows.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn insert(&self, new: NewArticle) -> Result<Article, StoreError> {
        let now = Utc::now();
        let article = Article {
            id: Uuid::new_v4(),
            heading: new.heading,
            content: new.content,
            image: new.image,
            owner_id: new.owner_id,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(article.clone());
        Ok(article)
    }

    async fn update(
        &self,
        id: &str,
        changes: ArticleChanges,
    ) -> Result<Option<Article>, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let mut rows = self.rows.write().await;
        let Some(article) = rows.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        if let Some(heading) = changes.heading {
            article.heading = heading;
        }
        if let Some(content) = changes.content {
            article.content = content;
        }
        if let Some(image) = changes.image {
            article.image = Some(image);
        }
        article.updated_at = Utc::now();

        Ok(Some(article.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(false);
        };

        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|a| a.id != id);
        Ok(rows.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-memory contact-query store.
#[derive(Default)]
pub struct MemoryQueryStore {
    rows: RwLock<Vec<Query>>,
}

impl MemoryQueryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueryStore for MemoryQueryStore {
    async fn find_all(&self) -> Result<Vec<Query>, StoreError> {
        Ok(self.rows.read().await.clone())
    }

    async fn insert(&self, new: NewQuery) -> Result<Query, StoreError> {
        let query = Query {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            subject: new.subject,
            message: new.message,
            created_at: Utc::now(),
        };
        self.rows.write().await.push(query.clone());
        Ok(query)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_article(owner: &str) -> NewArticle {
        NewArticle {
            heading: "H".to_string(),
            content: "C".to_string(),
            image: None,
            owner_id: owner.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamps() {
        let store = MemoryArticleStore::new();
        let article = store.insert(new_article("user-1")).await.unwrap();

        let found = store.find_by_id(&article.id.to_string()).await.unwrap();
        assert_eq!(found.unwrap().owner_id, "user-1");
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let store = MemoryArticleStore::new();
        let article = store.insert(new_article("user-1")).await.unwrap();

        let changes = ArticleChanges {
            image: Some("x.png".to_string()),
            ..Default::default()
        };
        let updated = store
            .update(&article.id.to_string(), changes)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.heading, "H");
        assert_eq!(updated.content, "C");
        assert_eq!(updated.image.as_deref(), Some("x.png"));
        assert_eq!(updated.owner_id, "user-1");
    }

    #[tokio::test]
    async fn malformed_id_locates_nothing() {
        let store = MemoryArticleStore::new();
        store.insert(new_article("user-1")).await.unwrap();

        assert!(store.find_by_id("45").await.unwrap().is_none());
        assert!(store.update("45", ArticleChanges::default()).await.unwrap().is_none());
        assert!(!store.delete("45").await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_permanently() {
        let store = MemoryArticleStore::new();
        let article = store.insert(new_article("user-1")).await.unwrap();
        let id = article.id.to_string();

        assert!(store.delete(&id).await.unwrap());
        assert!(store.find_by_id(&id).await.unwrap().is_none());
        assert!(!store.delete(&id).await.unwrap());
    }
}

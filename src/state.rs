use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::config::{DatabaseConfig, SecurityConfig};
use crate::store::article::PgArticleStore;
use crate::store::memory::{MemoryArticleStore, MemoryQueryStore};
use crate::store::query::PgQueryStore;
use crate::store::{pg, ArticleStore, QueryStore, StoreError};

/// Everything a request handler needs, constructed once at startup and
/// cloned per request. Stores and the token verifier are injected here
/// rather than reached through process globals.
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<dyn ArticleStore>,
    pub queries: Arc<dyn QueryStore>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    /// Postgres-backed state: connect, bootstrap the schema, wire the stores.
    pub async fn postgres(
        url: &str,
        database: &DatabaseConfig,
        security: &SecurityConfig,
    ) -> Result<Self, StoreError> {
        let pool = pg::connect(url, database).await?;
        pg::ensure_schema(&pool).await?;

        Ok(Self {
            articles: Arc::new(PgArticleStore::new(pool.clone())),
            queries: Arc::new(PgQueryStore::new(pool)),
            verifier: Arc::new(TokenVerifier::new(&security.jwt_secret)),
        })
    }

    /// Memory-backed state for local runs without a database, and for tests.
    pub fn in_memory(security: &SecurityConfig) -> Self {
        Self {
            articles: Arc::new(MemoryArticleStore::new()),
            queries: Arc::new(MemoryQueryStore::new()),
            verifier: Arc::new(TokenVerifier::new(&security.jwt_secret)),
        }
    }
}

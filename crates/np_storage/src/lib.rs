use np_core::{ArticleCollection, Error, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub mod backends;

pub use backends::*;

pub const DEFAULT_DB_PATH: &str = "news_database.db";

/// Builds the store named by `kind` ("sqlite" or "memory") and logs what it holds.
pub async fn create_storage(kind: &str, db_path: &Path) -> Result<Arc<dyn ArticleCollection>> {
    let storage: Arc<dyn ArticleCollection> = match kind {
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let store = SqliteStore::open(db_path).await?;
            info!(
                "📊 Current articles: {}, chat exchanges: {}",
                store.count_documents().await?,
                store.chat_history_count().await?
            );
            Arc::new(store)
        }
        "memory" => Arc::new(MemoryStore::new()),
        other => {
            return Err(Error::Storage(format!("Unknown storage backend: {}", other)));
        }
    };
    Ok(storage)
}

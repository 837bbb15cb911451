use async_trait::async_trait;
use np_core::prelude::*;
use np_core::{Cursor, DeleteResult, InsertManyResult, InsertOneResult};
use tokio::sync::RwLock;

#[derive(Debug)]
struct MemoryCollection {
    next_id: i64,
    // insertion order, oldest first
    articles: Vec<StoredArticle>,
}

impl MemoryCollection {
    fn new() -> Self {
        Self {
            next_id: 1,
            articles: Vec::new(),
        }
    }

    fn insert(&mut self, article: &Article) -> ArticleId {
        let id = ArticleId::from_raw(self.next_id);
        self.next_id += 1;
        self.articles.push(StoredArticle {
            id,
            article: article.clone(),
        });
        id
    }
}

/// Process-local store with the same contract as the SQLite one. Nothing survives a restart.
#[derive(Debug)]
pub struct MemoryStore {
    collection: RwLock<MemoryCollection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collection: RwLock::new(MemoryCollection::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleCollection for MemoryStore {
    async fn find(&self) -> Result<Cursor> {
        let collection = self.collection.read().await;
        Ok(Cursor::new(collection.articles.iter().rev().cloned().collect()))
    }

    async fn insert_one(&self, article: &Article) -> Result<InsertOneResult> {
        let mut collection = self.collection.write().await;
        Ok(InsertOneResult {
            inserted_id: collection.insert(article),
        })
    }

    async fn insert_many(&self, articles: &[Article]) -> Result<InsertManyResult> {
        let mut collection = self.collection.write().await;
        let inserted_ids = articles.iter().map(|a| collection.insert(a)).collect();
        Ok(InsertManyResult { inserted_ids })
    }

    async fn delete_one(&self, id: ArticleId) -> Result<DeleteResult> {
        let mut collection = self.collection.write().await;
        let before = collection.articles.len();
        collection.articles.retain(|stored| stored.id != id);
        Ok(DeleteResult {
            deleted_count: (before - collection.articles.len()) as u64,
        })
    }

    async fn delete_many(&self) -> Result<DeleteResult> {
        let mut collection = self.collection.write().await;
        let deleted_count = collection.articles.len() as u64;
        collection.articles.clear();
        Ok(DeleteResult { deleted_count })
    }

    async fn count_documents(&self) -> Result<u64> {
        Ok(self.collection.read().await.articles.len() as u64)
    }
}

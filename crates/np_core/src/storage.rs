use async_trait::async_trait;
use serde::Serialize;

use crate::types::{Article, ArticleId, StoredArticle};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertOneResult {
    pub inserted_id: ArticleId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertManyResult {
    pub inserted_ids: Vec<ArticleId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    pub deleted_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Result of [`ArticleCollection::find`]. Records are always newest first.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    docs: Vec<StoredArticle>,
}

impl Cursor {
    pub fn new(docs: Vec<StoredArticle>) -> Self {
        Self { docs }
    }

    /// The store keeps no index besides insertion order, so the key is ignored.
    pub fn sort(self, _field: &str, _order: SortOrder) -> Self {
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.docs.truncate(n);
        self
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn into_vec(self) -> Vec<StoredArticle> {
        self.docs
    }
}

impl IntoIterator for Cursor {
    type Item = StoredArticle;
    type IntoIter = std::vec::IntoIter<StoredArticle>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.into_iter()
    }
}

/// Collection-style access to stored articles.
///
/// Lookups that miss report zero counts instead of failing; only genuine
/// storage failures come back as errors.
#[async_trait]
pub trait ArticleCollection: Send + Sync {
    /// Every stored article, newest first.
    async fn find(&self) -> Result<Cursor>;

    /// Append one article and return its freshly assigned id.
    async fn insert_one(&self, article: &Article) -> Result<InsertOneResult>;

    /// Append all articles or none of them.
    async fn insert_many(&self, articles: &[Article]) -> Result<InsertManyResult>;

    async fn delete_one(&self, id: ArticleId) -> Result<DeleteResult>;

    /// Remove everything, reporting how many records were there before.
    async fn delete_many(&self) -> Result<DeleteResult>;

    async fn count_documents(&self) -> Result<u64>;

    async fn find_recent(&self, limit: usize) -> Result<Vec<StoredArticle>> {
        Ok(self
            .find()
            .await?
            .sort("_id", SortOrder::Descending)
            .limit(limit)
            .into_vec())
    }

    /// Like [`delete_one`](Self::delete_one) but keyed by the textual id.
    /// A malformed key matches nothing.
    async fn delete_one_by_key(&self, key: &str) -> Result<DeleteResult> {
        match key.parse::<ArticleId>() {
            Ok(id) => self.delete_one(id).await,
            Err(_) => Ok(DeleteResult { deleted_count: 0 }),
        }
    }
}

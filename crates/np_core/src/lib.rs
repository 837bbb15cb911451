pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use models::ChatModel;
pub use storage::{
    ArticleCollection, Cursor, DeleteResult, InsertManyResult, InsertOneResult, SortOrder,
};
pub use types::{Article, ArticleId, ChatExchange, StoredArticle, DEFAULT_CATEGORY};

pub mod prelude {
    pub use super::{Article, ArticleCollection, ArticleId, Error, Result, StoredArticle};
}

use np_core::{ArticleCollection, ChatModel, Error, Result};
use std::sync::Arc;

pub mod keyword;

pub use keyword::KeywordModel;

pub const DEFAULT_MODEL: &str = "keyword";

/// Builds the chat model registered under `name`.
pub fn create_model(name: &str, store: Arc<dyn ArticleCollection>) -> Result<Arc<dyn ChatModel>> {
    match name {
        "keyword" => Ok(Arc::new(KeywordModel::new(store))),
        other => Err(Error::Chat(format!("Unknown chat model: {}", other))),
    }
}

use np_core::{ArticleCollection, ChatModel};
use np_scrapers::FeedIngestor;
use std::sync::Arc;

/// Everything the handlers need, built once at startup.
pub struct AppState {
    pub store: Arc<dyn ArticleCollection>,
    pub ingestor: Arc<FeedIngestor>,
    pub chat_model: Arc<dyn ChatModel>,
}

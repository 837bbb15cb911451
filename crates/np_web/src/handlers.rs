use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use np_core::{Article, ArticleId, ChatExchange, StoredArticle};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::{ApiError, AppState};

type ApiResult<T> = Result<Json<T>, ApiError>;

fn default_source() -> String {
    "all".to_string()
}

fn default_scrape_category() -> String {
    np_core::DEFAULT_CATEGORY.to_string()
}

fn nullable_source<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_source))
}

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default = "default_source", deserialize_with = "nullable_source")]
    pub source: String,
    #[serde(
        default = "default_scrape_category",
        deserialize_with = "np_core::types::nullable_category"
    )]
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub bot_message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatExchange> for ChatReply {
    fn from(exchange: ChatExchange) -> Self {
        Self {
            bot_message: exchange.bot_message,
            timestamp: exchange.timestamp,
        }
    }
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to AI News Portal API!",
        "endpoints": {
            "get_news": "GET /news",
            "add_news": "POST /news",
            "delete_all": "DELETE /news",
            "delete_one": "DELETE /news/{id}",
            "scrape": "POST /scrape",
            "chat": "POST /chat"
        },
        "database": "SQLite (embedded file storage)"
    }))
}

pub async fn list_articles(State(state): State<Arc<AppState>>) -> ApiResult<Vec<StoredArticle>> {
    Ok(Json(state.store.find().await?.into_vec()))
}

pub async fn create_article(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Article>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(article) = payload?;
    let result = state.store.insert_one(&article).await?;
    let stored = StoredArticle {
        id: result.inserted_id,
        article,
    };

    Ok(Json(json!({
        "status": "success",
        "message": "Article added to database",
        "id": stored.id,
        "article": stored,
    })))
}

pub async fn delete_all_articles(State(state): State<Arc<AppState>>) -> ApiResult<Value> {
    let result = state.store.delete_many().await?;
    info!("🗑️ Deleted {} articles", result.deleted_count);

    Ok(Json(json!({
        "status": "success",
        "message": format!("Deleted {} articles from database", result.deleted_count),
        "remaining": 0,
    })))
}

pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Value> {
    let id: ArticleId = raw_id.parse()?;
    let result = state.store.delete_one(id).await?;
    if result.deleted_count == 0 {
        return Err(ApiError::NotFound(format!("Article with ID {} not found", raw_id)));
    }

    let remaining = state.store.count_documents().await?;
    Ok(Json(json!({
        "status": "success",
        "message": format!("Deleted article with ID {}", raw_id),
        "remaining_count": remaining,
    })))
}

pub async fn scrape(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(request) = payload?;
    info!("🦗 Scrape requested (source: {}, category: {})", request.source, request.category);

    let outcome = state
        .ingestor
        .scrape_into(&request.category, state.store.as_ref())
        .await?;

    // an empty scrape is reported in the body, not as an HTTP error
    if outcome.articles.is_empty() {
        return Ok(Json(json!({
            "status": "error",
            "message": format!("No articles found for category: {}", request.category),
            "articles_scraped": 0,
        })));
    }

    let scraped = outcome.articles.len();
    Ok(Json(json!({
        "status": "success",
        "message": format!("Scraped and saved {} articles", scraped),
        "articles_scraped": scraped,
        "category": request.category,
        "inserted_ids": outcome.inserted_ids,
    })))
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<ChatReply> {
    let Json(request) = payload?;

    let bot_message = match state.chat_model.reply(&request.user_message).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("❌ Chat reply failed: {}", e);
            format!("Sorry, I encountered an error: {}", e)
        }
    };

    let exchange = ChatExchange::new(request.user_message, bot_message);
    debug!(model = state.chat_model.name(), user_message = %exchange.user_message, "💬 Chat exchange");
    Ok(Json(ChatReply::from(exchange)))
}

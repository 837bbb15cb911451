use async_trait::async_trait;
use np_core::{ArticleCollection, ChatModel, Result, StoredArticle};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use crate::intent::{self, Intent};

/// How many of the most recent articles a reply can draw on.
pub const CONTEXT_WINDOW: usize = 10;

pub const NO_ARTICLES: &str = "I don't have any news articles in the database yet. Please scrape some news first using the /scrape endpoint!";

const NO_TECH_NEWS: &str = "I don't have any technology news yet. Try scraping tech news first!";

const HELP_TEXT: &str = r#"🤖 **I can help you with:**

1. **Latest News**: Ask "What are the latest news?"
2. **Category News**: Ask "Tell me about technology news"
3. **Summaries**: Ask "Summarize the top articles"
4. **Counts**: Ask "How many articles do you have?"
5. **Sources**: Ask "What are your news sources?"

Just ask me anything about the news!"#;

/// Rule-based chat over the stored articles. No language model involved.
pub struct KeywordModel {
    store: Arc<dyn ArticleCollection>,
}

impl fmt::Debug for KeywordModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordModel").finish()
    }
}

impl KeywordModel {
    pub fn new(store: Arc<dyn ArticleCollection>) -> Self {
        Self { store }
    }

    /// A window that cannot be read is treated as empty.
    async fn recent_articles(&self) -> Vec<StoredArticle> {
        match self.store.find_recent(CONTEXT_WINDOW).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("Error getting news: {}", e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl ChatModel for KeywordModel {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn reply(&self, user_message: &str) -> Result<String> {
        let articles = self.recent_articles().await;
        if articles.is_empty() {
            return Ok(NO_ARTICLES.to_string());
        }

        let reply = match intent::detect(user_message) {
            Intent::Latest => latest(&articles),
            Intent::Technology => technology(&articles),
            Intent::Summary => summary(&articles),
            Intent::Count => count(self.store.count_documents().await?),
            Intent::Sources => sources(&articles),
            Intent::Greeting => greeting(&articles),
            Intent::Help => HELP_TEXT.to_string(),
            Intent::Fallback => fallback(&articles),
        };
        Ok(reply)
    }
}

/// First `chars` characters of the article body.
fn preview(article: &StoredArticle, chars: usize) -> String {
    article.article.content.chars().take(chars).collect()
}

fn latest(articles: &[StoredArticle]) -> String {
    let mut response = String::from("Here are the latest news articles:\n\n");
    for (i, stored) in articles.iter().take(5).enumerate() {
        response.push_str(&format!(
            "{}. **{}**\n   Source: {}\n   {}...\n\n",
            i + 1,
            stored.article.title,
            stored.article.source,
            preview(stored, 150)
        ));
    }
    response
}

fn technology(articles: &[StoredArticle]) -> String {
    let tech: Vec<&StoredArticle> = articles
        .iter()
        .filter(|stored| stored.article.category == "technology")
        .collect();
    if tech.is_empty() {
        return NO_TECH_NEWS.to_string();
    }

    let mut response = String::from("Here are the technology news:\n\n");
    for (i, stored) in tech.into_iter().take(3).enumerate() {
        response.push_str(&format!(
            "{}. **{}**\n   {}...\n\n",
            i + 1,
            stored.article.title,
            preview(stored, 150)
        ));
    }
    response
}

fn summary(articles: &[StoredArticle]) -> String {
    let mut response = String::from("📰 **News Summary**\n\n");
    for (i, stored) in articles.iter().take(3).enumerate() {
        response.push_str(&format!(
            "{}. **{}** ({})\n   {}...\n\n",
            i + 1,
            stored.article.title,
            stored.article.source,
            preview(stored, 100)
        ));
    }
    response.push_str(&format!(
        "\nI have {} articles to show you. Would you like to know more about any specific topic?",
        articles.len()
    ));
    response
}

fn count(total: u64) -> String {
    format!(
        "📊 I currently have {} news articles in the database. They cover topics like technology, business, and general news. What would you like to know about them?",
        total
    )
}

fn sources(articles: &[StoredArticle]) -> String {
    let mut seen = HashSet::new();
    let names: Vec<&str> = articles
        .iter()
        .map(|stored| stored.article.source.as_str())
        .filter(|name| seen.insert(*name))
        .collect();
    format!(
        "📰 My news comes from these sources: {}. I can provide more details about any of these sources!",
        names.join(", ")
    )
}

fn greeting(articles: &[StoredArticle]) -> String {
    format!(
        "👋 Hello! I'm your AI news assistant. I have {} news articles ready for you. You can ask me about:\n- Latest news\n- Technology news\n- News summaries\n- Specific topics\n\nWhat would you like to know?",
        articles.len()
    )
}

fn fallback(articles: &[StoredArticle]) -> String {
    let mut response = String::from("I found some relevant news for you:\n\n");
    for (i, stored) in articles.iter().take(3).enumerate() {
        response.push_str(&format!(
            "{}. **{}**\n   Source: {}\n   {}...\n\n",
            i + 1,
            stored.article.title,
            stored.article.source,
            preview(stored, 120)
        ));
    }
    response.push_str("\n💡 Try asking: 'latest news', 'tech news', or 'summarize articles'");
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use np_core::{Article, ArticleId, Cursor, DeleteResult, Error, InsertManyResult, InsertOneResult};
    use np_storage::MemoryStore;

    async fn store_with(articles: &[Article]) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.insert_many(articles).await.unwrap();
        store
    }

    fn numbered(n: usize) -> Vec<Article> {
        (1..=n)
            .map(|i| Article::new(format!("Story {}", i), format!("Body of story {}", i), "CNN"))
            .collect()
    }

    async fn ask(store: Arc<MemoryStore>, message: &str) -> String {
        KeywordModel::new(store).reply(message).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_store_always_gets_no_articles_message() {
        for message in ["latest", "How many articles?", "hello", "help", "", "tech"] {
            assert_eq!(ask(store_with(&[]).await, message).await, NO_ARTICLES);
        }
    }

    #[tokio::test]
    async fn test_latest_lists_at_most_five_newest() {
        let store = store_with(&numbered(7)).await;
        let reply = ask(store, "What is the latest news?").await;

        assert!(reply.starts_with("Here are the latest news articles:\n\n"));
        assert!(reply.contains("1. **Story 7**\n   Source: CNN\n   Body of story 7...\n\n"));
        assert!(reply.contains("5. **Story 3**"));
        assert!(!reply.contains("6. **"));
        assert!(!reply.contains("Story 2"));
    }

    #[tokio::test]
    async fn test_latest_preview_is_150_characters() {
        let long = Article::new("Long", "x".repeat(400), "BBC News");
        let reply = ask(store_with(&[long]).await, "recent").await;
        assert!(reply.contains(&format!("   {}...\n\n", "x".repeat(150))));
        assert!(!reply.contains(&"x".repeat(151)));
    }

    #[tokio::test]
    async fn test_technology_filters_by_category() {
        let articles = vec![
            Article::new("Markets", "Stocks", "Bloomberg").with_category("business"),
            Article::new("Chips", "Silicon", "TechCrunch").with_category("technology"),
        ];
        let reply = ask(store_with(&articles).await, "tech please").await;
        assert_eq!(reply, "Here are the technology news:\n\n1. **Chips**\n   Silicon...\n\n");

        let reply = ask(store_with(&articles[..1]).await, "computer").await;
        assert_eq!(reply, NO_TECH_NEWS);
    }

    #[tokio::test]
    async fn test_summary_reports_window_size() {
        let store = store_with(&numbered(12)).await;
        let reply = ask(store, "give me a brief").await;
        assert!(reply.starts_with("📰 **News Summary**\n\n1. **Story 12** (CNN)\n   Body of story 12...\n\n"));
        assert!(reply.contains("3. **Story 10**"));
        assert!(reply.ends_with(
            "\nI have 10 articles to show you. Would you like to know more about any specific topic?"
        ));
    }

    #[tokio::test]
    async fn test_count_uses_live_total() {
        let store = store_with(&numbered(15)).await;
        let reply = ask(store, "How many articles?").await;
        assert_eq!(
            reply,
            "📊 I currently have 15 news articles in the database. They cover topics like technology, business, and general news. What would you like to know about them?"
        );
    }

    #[tokio::test]
    async fn test_sources_are_distinct_in_first_seen_order() {
        let articles = vec![
            Article::new("a", "a", "BBC News"),
            Article::new("b", "b", "CNN"),
            Article::new("c", "c", "BBC News"),
        ];
        let reply = ask(store_with(&articles).await, "from where?").await;
        assert_eq!(
            reply,
            "📰 My news comes from these sources: BBC News, CNN. I can provide more details about any of these sources!"
        );
    }

    #[tokio::test]
    async fn test_greeting_and_help() {
        let store = store_with(&numbered(2)).await;
        let reply = ask(store.clone(), "hey").await;
        assert!(reply.starts_with("👋 Hello! I'm your AI news assistant. I have 2 news articles ready for you."));

        assert_eq!(ask(store, "commands").await, HELP_TEXT);
    }

    #[tokio::test]
    async fn test_fallback_lists_three_with_hint() {
        let store = store_with(&numbered(4)).await;
        let reply = ask(store, "weather in Paris").await;
        assert!(reply.starts_with(
            "I found some relevant news for you:\n\n1. **Story 4**\n   Source: CNN\n   Body of story 4...\n\n"
        ));
        assert!(!reply.contains("Story 1**"));
        assert!(reply.ends_with("\n💡 Try asking: 'latest news', 'tech news', or 'summarize articles'"));
    }

    struct BrokenStore;

    #[async_trait]
    impl ArticleCollection for BrokenStore {
        async fn find(&self) -> Result<Cursor> {
            Err(Error::Database("disk I/O error".to_string()))
        }
        async fn insert_one(&self, _article: &Article) -> Result<InsertOneResult> {
            Err(Error::Database("disk I/O error".to_string()))
        }
        async fn insert_many(&self, _articles: &[Article]) -> Result<InsertManyResult> {
            Err(Error::Database("disk I/O error".to_string()))
        }
        async fn delete_one(&self, _id: ArticleId) -> Result<DeleteResult> {
            Err(Error::Database("disk I/O error".to_string()))
        }
        async fn delete_many(&self) -> Result<DeleteResult> {
            Err(Error::Database("disk I/O error".to_string()))
        }
        async fn count_documents(&self) -> Result<u64> {
            Err(Error::Database("disk I/O error".to_string()))
        }
    }

    #[tokio::test]
    async fn test_unreadable_window_counts_as_empty() {
        let model = KeywordModel::new(Arc::new(BrokenStore));
        assert_eq!(model.reply("latest").await.unwrap(), NO_ARTICLES);
    }
}

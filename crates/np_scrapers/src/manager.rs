use np_core::{Article, ArticleCollection, ArticleId, Result};
use std::sync::Arc;

use crate::catalog::{self, FeedTarget};
use crate::logging::Logger;
use crate::scrapers::{parse_feed, FeedFetcher, HttpFetcher};

/// What a scrape produced and where it ended up.
#[derive(Debug, Clone, Default)]
pub struct ScrapeOutcome {
    pub articles: Vec<Article>,
    pub inserted_ids: Vec<ArticleId>,
}

/// Turns category requests into normalized articles, one feed at a time.
///
/// Feeds fail independently: a feed that cannot be fetched or parsed is logged
/// and contributes nothing, while the rest of the category still goes through.
pub struct FeedIngestor {
    fetcher: Arc<dyn FeedFetcher>,
    logger: Logger,
}

impl FeedIngestor {
    pub fn new(fetcher: Arc<dyn FeedFetcher>) -> Self {
        Self {
            fetcher,
            logger: Logger::new().with_prefix("🦗".to_string()),
        }
    }

    pub fn with_http() -> Result<Self> {
        Ok(Self::new(Arc::new(HttpFetcher::new()?)))
    }

    pub async fn scrape_category(&self, category: &str) -> Vec<Article> {
        let Some(targets) = catalog::targets_for(category) else {
            self.logger.warn(&format!("❌ Unknown category: {}", category));
            return Vec::new();
        };

        let mut articles = Vec::new();
        for FeedTarget { source, category } in targets {
            articles.extend(self.scrape_feed(source.url, source.name, category).await);
        }

        self.logger.info(&format!("🎉 Total articles scraped: {}", articles.len()));
        articles
    }

    pub async fn scrape_feed(&self, url: &str, source_name: &str, category: &str) -> Vec<Article> {
        let logger = self.logger.clone().with_prefix(format!("[{}]", source_name));
        logger.debug(&format!("Fetching {}", url));

        let result = self
            .fetcher
            .fetch(url)
            .await
            .and_then(|body| parse_feed(&body, source_name, category));

        match result {
            Ok(articles) => {
                logger.info(&format!("✅ Scraped {} articles", articles.len()));
                articles
            }
            Err(e) => {
                logger.error(&format!("❌ Error scraping {}: {}", url, e));
                Vec::new()
            }
        }
    }

    /// Scrapes `category` and stores whatever came back in a single batch.
    /// Nothing is written when no articles were found.
    pub async fn scrape_into(
        &self,
        category: &str,
        store: &dyn ArticleCollection,
    ) -> Result<ScrapeOutcome> {
        let articles = self.scrape_category(category).await;
        if articles.is_empty() {
            return Ok(ScrapeOutcome::default());
        }

        let result = store.insert_many(&articles).await?;
        Ok(ScrapeOutcome {
            articles,
            inserted_ids: result.inserted_ids,
        })
    }
}

use async_trait::async_trait;
use np_core::{Error, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub mod rss;

pub use rss::parse_feed;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const TOTAL_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = "news-portal/0.1 (RSS reader)";

/// Source of raw feed documents.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Returns the body of the document at `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetches feeds over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(TOTAL_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let url = utils::parse_url(url)?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Feed(format!("HTTP error: {}", response.status())));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Common utilities for feed normalization
pub(crate) mod utils {
    use super::*;
    use scraper::Html;

    /// Stored article bodies never exceed this many characters.
    pub const MAX_CONTENT_CHARS: usize = 500;
    const ELLIPSIS: &str = "...";

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::Feed(format!("Failed to parse URL: {}", e)))
    }

    /// Drops markup, keeping trimmed text nodes joined by single spaces, then truncates.
    pub fn clean_html(html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }

        let fragment = Html::parse_fragment(html);
        let text = fragment
            .root_element()
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        truncate_content(&text)
    }

    pub fn truncate_content(text: &str) -> String {
        if text.chars().count() <= MAX_CONTENT_CHARS {
            return text.to_string();
        }
        let kept: String = text.chars().take(MAX_CONTENT_CHARS - ELLIPSIS.len()).collect();
        format!("{}{}", kept, ELLIPSIS)
    }
}

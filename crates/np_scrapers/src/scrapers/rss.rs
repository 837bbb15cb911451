use feed_rs::model::Entry;
use np_core::{Article, Error, Result};

use super::utils::clean_html;

/// Only the head of each feed is kept.
pub const MAX_ENTRIES_PER_FEED: usize = 10;

pub const NO_TITLE: &str = "No title";
pub const NO_CONTENT: &str = "No content available";

/// Parses an RSS/Atom document into articles attributed to `source`.
pub fn parse_feed(bytes: &[u8], source: &str, category: &str) -> Result<Vec<Article>> {
    let feed = feed_rs::parser::parse(bytes)
        .map_err(|e| Error::Feed(format!("failed to parse feed: {}", e)))?;

    Ok(feed
        .entries
        .into_iter()
        .take(MAX_ENTRIES_PER_FEED)
        .map(|entry| entry_to_article(entry, source, category))
        .collect())
}

fn entry_to_article(entry: Entry, source: &str, category: &str) -> Article {
    let image_url = image_url(&entry);
    let content = entry
        .summary
        .map(|text| text.content)
        .or_else(|| entry.content.and_then(|c| c.body))
        .unwrap_or_else(|| NO_CONTENT.to_string());

    Article {
        title: entry
            .title
            .map(|text| text.content)
            .unwrap_or_else(|| NO_TITLE.to_string()),
        content: clean_html(&content),
        source: source.to_string(),
        url: entry.links.into_iter().next().map(|link| link.href),
        published_date: entry.published,
        category: category.to_string(),
        image_url,
    }
}

// media:content wins over media:thumbnail
fn image_url(entry: &Entry) -> Option<String> {
    entry
        .media
        .iter()
        .flat_map(|media| media.content.iter())
        .find_map(|content| content.url.as_ref().map(|url| url.to_string()))
        .or_else(|| {
            entry
                .media
                .iter()
                .flat_map(|media| media.thumbnails.iter())
                .map(|thumbnail| thumbnail.image.uri.clone())
                .next()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Example News</title>
    <link>https://news.example.com</link>
    <description>Example</description>
    <item>
      <title>Chip makers rally</title>
      <link>https://news.example.com/chips</link>
      <description>&lt;p&gt;Shares &lt;b&gt;rose&lt;/b&gt; sharply.&lt;/p&gt;</description>
      <pubDate>Fri, 09 Feb 2024 10:30:00 GMT</pubDate>
      <media:content url="https://img.example.com/chips.jpg" medium="image"/>
    </item>
    <item>
      <link>https://news.example.com/untitled</link>
      <media:thumbnail url="https://img.example.com/thumb.jpg"/>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_feed_maps_fields() {
        let articles = parse_feed(FEED.as_bytes(), "Example", "business").unwrap();
        assert_eq!(articles.len(), 2);

        let first = &articles[0];
        assert_eq!(first.title, "Chip makers rally");
        assert_eq!(first.content, "Shares rose sharply.");
        assert_eq!(first.source, "Example");
        assert_eq!(first.category, "business");
        assert_eq!(first.url.as_deref(), Some("https://news.example.com/chips"));
        assert_eq!(
            first.published_date,
            Some(Utc.with_ymd_and_hms(2024, 2, 9, 10, 30, 0).unwrap())
        );
        assert_eq!(
            first.image_url.as_deref(),
            Some("https://img.example.com/chips.jpg")
        );
    }

    #[test]
    fn test_parse_feed_defaults_missing_fields() {
        let articles = parse_feed(FEED.as_bytes(), "Example", "general").unwrap();
        let second = &articles[1];
        assert_eq!(second.title, NO_TITLE);
        assert_eq!(second.content, NO_CONTENT);
        assert!(second.published_date.is_none());
        assert_eq!(
            second.image_url.as_deref(),
            Some("https://img.example.com/thumb.jpg")
        );
    }

    #[test]
    fn test_parse_feed_keeps_first_ten_entries() {
        let items: String = (0..15)
            .map(|i| format!("<item><title>Story {}</title><description>Body</description></item>", i))
            .collect();
        let xml = format!(
            r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Busy</title>{}</channel></rss>"#,
            items
        );
        let articles = parse_feed(xml.as_bytes(), "Busy", "general").unwrap();
        assert_eq!(articles.len(), MAX_ENTRIES_PER_FEED);
        assert_eq!(articles[0].title, "Story 0");
        assert_eq!(articles[9].title, "Story 9");
    }

    #[test]
    fn test_parse_feed_rejects_garbage() {
        assert!(matches!(
            parse_feed(b"this is not a feed", "Broken", "general"),
            Err(Error::Feed(_))
        ));
    }
}

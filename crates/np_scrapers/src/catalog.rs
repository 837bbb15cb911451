use np_core::DEFAULT_CATEGORY;

/// Category name that expands to every configured feed.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSource {
    pub url: &'static str,
    pub name: &'static str,
}

/// One feed to scrape and the category its articles are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedTarget {
    pub source: FeedSource,
    pub category: &'static str,
}

pub const CATALOG: &[(&str, &[FeedSource])] = &[
    (
        "technology",
        &[
            FeedSource {
                url: "https://techcrunch.com/feed/",
                name: "TechCrunch",
            },
            FeedSource {
                url: "https://www.theverge.com/rss/index.xml",
                name: "The Verge",
            },
        ],
    ),
    (
        "general",
        &[
            FeedSource {
                url: "http://rss.cnn.com/rss/cnn_topstories.rss",
                name: "CNN",
            },
            FeedSource {
                url: "http://feeds.bbci.co.uk/news/rss.xml",
                name: "BBC News",
            },
        ],
    ),
    (
        "business",
        &[FeedSource {
            url: "https://feeds.bloomberg.com/markets/news.rss",
            name: "Bloomberg",
        }],
    ),
];

/// Resolves a requested category to the feeds to scrape.
///
/// `"all"` yields every feed in catalog order, each filed under the default
/// category. Unknown categories yield `None`.
pub fn targets_for(category: &str) -> Option<Vec<FeedTarget>> {
    if category == ALL_CATEGORIES {
        return Some(
            CATALOG
                .iter()
                .flat_map(|(_, sources)| sources.iter())
                .map(|source| FeedTarget {
                    source: *source,
                    category: DEFAULT_CATEGORY,
                })
                .collect(),
        );
    }

    CATALOG
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(name, sources)| {
            sources
                .iter()
                .map(|source| FeedTarget {
                    source: *source,
                    category: name,
                })
                .collect()
        })
}

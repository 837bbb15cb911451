pub mod catalog;
pub mod cli;
pub mod logging;
pub mod manager;
pub mod scrapers;

pub use catalog::{FeedSource, FeedTarget, ALL_CATEGORIES};
pub use cli::{handle_command, ScraperCommands};
pub use manager::{FeedIngestor, ScrapeOutcome};
pub use scrapers::{FeedFetcher, HttpFetcher};


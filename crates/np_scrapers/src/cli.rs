use clap::Subcommand;
use np_core::{ArticleCollection, Result};

use crate::catalog::{ALL_CATEGORIES, CATALOG};
use crate::manager::FeedIngestor;

#[derive(Subcommand, Debug, Clone)]
pub enum ScraperCommands {
    /// Scrape a category of feeds and store the articles
    Scrape {
        /// technology, general, business or all
        #[arg(default_value = ALL_CATEGORIES)]
        category: String,
    },
    /// List the configured feeds
    Feeds,
}

pub async fn handle_command(
    command: ScraperCommands,
    ingestor: &FeedIngestor,
    store: &dyn ArticleCollection,
) -> Result<()> {
    match command {
        ScraperCommands::Scrape { category } => {
            let outcome = ingestor.scrape_into(&category, store).await?;
            if outcome.articles.is_empty() {
                println!("No articles found for category: {}", category);
                return Ok(());
            }

            for (article, id) in outcome.articles.iter().zip(&outcome.inserted_ids) {
                println!("🆕 [{}] {} - {}", id, article.title, article.source);
            }
            println!("Scraped and saved {} articles", outcome.articles.len());
        }
        ScraperCommands::Feeds => {
            for line in feed_listing() {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

fn feed_listing() -> Vec<String> {
    CATALOG
        .iter()
        .flat_map(|(category, sources)| {
            sources
                .iter()
                .map(move |source| format!("{:<12} {:<12} {}", category, source.name, source.url))
        })
        .collect()
}

use clap::Parser;
use np_core::Result;
use np_scrapers::{handle_command, FeedIngestor, ScraperCommands};
use np_web::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "AI news portal backend", long_about = None)]
pub struct Cli {
    /// Storage backend: sqlite (default) or memory
    #[arg(long, env = "NEWS_PORTAL_STORAGE", default_value = "sqlite")]
    storage: String,
    /// Database file used by the sqlite backend
    #[arg(long, env = "NEWS_PORTAL_DB", default_value = np_storage::DEFAULT_DB_PATH)]
    db_path: PathBuf,
    #[arg(long, default_value = np_chat::DEFAULT_MODEL, help = "Chat model to answer /chat with. Available models: keyword (default)")]
    chat_model: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, env = "NEWS_PORTAL_ADDR", default_value = "0.0.0.0:8000")]
        addr: SocketAddr,
    },
    #[command(flatten)]
    Scraper(ScraperCommands),
}

#[tokio::main]
async fn main() -> Result<()> {
    np_scrapers::logging::init_logging();
    let cli = Cli::parse();

    let store = np_storage::create_storage(&cli.storage, &cli.db_path).await?;
    info!("✨ Storage initialized successfully (using {})", cli.storage);

    let ingestor = FeedIngestor::with_http()?;

    match cli.command {
        Commands::Serve { addr } => {
            let chat_model = np_chat::create_model(&cli.chat_model, store.clone())?;
            info!("🧠 Chat model initialized successfully (using {})", chat_model.name());

            let state = AppState {
                store,
                ingestor: Arc::new(ingestor),
                chat_model,
            };
            np_web::serve(addr, state).await?;
        }
        Commands::Scraper(command) => {
            handle_command(command, &ingestor, store.as_ref()).await?;
        }
    }

    Ok(())
}

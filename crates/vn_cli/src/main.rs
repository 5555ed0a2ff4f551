use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use vn_core::config::{Environment, SearchConfig, ServiceConfig};
use vn_core::types::{ArticleFilter, Industry};
use vn_core::{Error, NewsStore, Result};
use vn_news::fetch::HttpPageFetcher;
use vn_news::search::{BraveSearchBackend, ScrapeSearchBackend, SearchAdapter, SearchBackend};
use vn_news::NewsService;
use vn_storage::{MemoryStore, SqliteStore};
use vn_web::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Market news for the dental and aesthetic verticals", long_about = None)]
struct Cli {
    #[arg(long, default_value = "memory", help = "Storage backend: memory or sqlite")]
    storage: String,
    #[arg(long, default_value = "news.db", help = "Database file for the sqlite backend")]
    db_path: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch news articles for an industry (dental or aesthetic)
    Articles {
        industry: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// List news categories for an industry
    Categories { industry: String },
    /// List news sources for an industry
    Sources { industry: String },
    /// List featured articles for an industry
    Featured {
        industry: String,
        #[arg(long, default_value_t = 3)]
        limit: usize,
    },
    /// List trending topics for an industry
    Trending {
        industry: String,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// List upcoming industry events
    Events {
        industry: String,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Serve the news API over HTTP
    Serve {
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

fn search_config_from_env() -> SearchConfig {
    let environment = match std::env::var("VN_ENVIRONMENT").as_deref() {
        Ok("production") | Ok("prod") => Environment::Production,
        _ => Environment::Development,
    };
    SearchConfig {
        environment,
        // No scrape-search tool capability is wired into this binary.
        scrape_search_enabled: false,
        api_key: std::env::var("BRAVE_SEARCH_API_KEY").ok(),
    }
}

async fn create_store(cli: &Cli) -> Result<Arc<dyn NewsStore>> {
    match cli.storage.as_str() {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "sqlite" => Ok(Arc::new(SqliteStore::new_with_path(&cli.db_path).await?)),
        other => Err(Error::Storage(format!("Unknown storage backend: {}", other))),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store = create_store(&cli).await?;
    info!("storage initialized ({})", cli.storage);

    let search_config = search_config_from_env();
    let service_config = ServiceConfig::default();
    let backends: Vec<Box<dyn SearchBackend>> = vec![
        Box::new(ScrapeSearchBackend::new(&search_config, None)),
        Box::new(BraveSearchBackend::new(&search_config)),
    ];
    let adapter = SearchAdapter::new(backends);
    let fetcher = Arc::new(HttpPageFetcher::new(service_config.scrape_timeout));
    let service = Arc::new(
        NewsService::new(store, adapter, fetcher).with_config(service_config),
    );

    match cli.command {
        Commands::Articles {
            industry,
            limit,
            category,
            source,
            search,
        } => {
            let industry: Industry = industry.parse()?;
            let filter = ArticleFilter {
                limit,
                category,
                source,
                search_term: search,
            };
            let articles = service.articles(industry, &filter).await;
            info!("returning {} {} articles", articles.len(), industry);
            print_json(&articles)?;
        }
        Commands::Categories { industry } => {
            let industry: Industry = industry.parse()?;
            print_json(&service.categories(industry).await)?;
        }
        Commands::Sources { industry } => {
            let industry: Industry = industry.parse()?;
            print_json(&service.sources(industry).await)?;
        }
        Commands::Featured { industry, limit } => {
            let industry: Industry = industry.parse()?;
            print_json(&service.featured_articles(industry, limit).await)?;
        }
        Commands::Trending { industry, limit } => {
            let industry: Industry = industry.parse()?;
            print_json(&service.trending_topics(industry, limit).await)?;
        }
        Commands::Events { industry, limit } => {
            let industry: Industry = industry.parse()?;
            print_json(&service.upcoming_events(industry, limit).await)?;
        }
        Commands::Serve { port } => {
            let app = vn_web::create_app(AppState { service });
            let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
            info!("news API listening on port {}", port);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

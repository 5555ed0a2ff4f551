use chrono::{Duration, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::extract::extract_details;
use crate::fetch::PageFetcher;
use crate::mock::MockGenerator;
use crate::search::{build_search_query, SearchAdapter};
use crate::source::resolve_source;
use vn_core::config::ServiceConfig;
use vn_core::types::{
    ArticleDetails, ArticleFilter, Industry, IndustryEvent, NewsArticle, NewsCategory, NewsSource,
    TrendingTopic,
};
use vn_core::{NewsStore, Result};

/// The acquisition orchestrator: persisted store first, then live search and
/// scraping, then synthesized placeholders. Every public operation resolves
/// to a list and never surfaces an error; the observable failure mode is
/// fewer or zero items.
pub struct NewsService {
    store: Arc<dyn NewsStore>,
    search: SearchAdapter,
    fetcher: Arc<dyn PageFetcher>,
    mock: MockGenerator,
    config: ServiceConfig,
}

impl NewsService {
    pub fn new(store: Arc<dyn NewsStore>, search: SearchAdapter, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            store,
            search,
            fetcher,
            mock: MockGenerator::new(),
            config: ServiceConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_mock_generator(mut self, mock: MockGenerator) -> Self {
        self.mock = mock;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Fetch news articles for an industry. Store results come first, topped
    /// up from live search when the store under-fills, with synthesized
    /// articles as the unconditional last resort.
    pub async fn articles(&self, industry: Industry, filter: &ArticleFilter) -> Vec<NewsArticle> {
        if filter.limit == 0 {
            return Vec::new();
        }
        let since = Utc::now() - Duration::days(self.config.recency_days);

        match self.store.recent_articles(industry, since, filter).await {
            Ok(stored) => {
                info!("found {} stored {} articles", stored.len(), industry);
                if stored.len() >= filter.limit {
                    return stored;
                }
                let remaining = filter.limit - stored.len();
                let seen = stored.iter().map(|a| a.url.clone()).collect();
                let fresh = self
                    .acquire_external(industry, &filter.with_limit(remaining), seen)
                    .await;
                let mut merged = stored;
                merged.extend(fresh);
                if merged.is_empty() {
                    self.generate_mock(industry, filter)
                } else {
                    merged
                }
            }
            Err(e) => {
                warn!("store read failed, trying external sources: {}", e);
                let fresh = self
                    .acquire_external(industry, filter, HashSet::new())
                    .await;
                if fresh.is_empty() {
                    self.generate_mock(industry, filter)
                } else {
                    fresh
                }
            }
        }
    }

    fn generate_mock(&self, industry: Industry, filter: &ArticleFilter) -> Vec<NewsArticle> {
        info!("no {} news found, generating mock articles", industry);
        self.mock.generate(
            industry,
            filter.limit,
            filter.category.as_deref(),
            filter.source.as_deref(),
        )
    }

    /// Live acquisition: one search call, then per-hit scraping in discovery
    /// order. All failures are absorbed here; the worst outcome is an empty
    /// list.
    async fn acquire_external(
        &self,
        industry: Industry,
        filter: &ArticleFilter,
        mut seen: HashSet<String>,
    ) -> Vec<NewsArticle> {
        let query = build_search_query(industry, filter);
        info!("searching externally: \"{}\"", query);
        let hits = self.search.search(&query, filter.limit).await;
        let since = Utc::now() - Duration::days(self.config.recency_days);
        let mut articles = Vec::new();

        for hit in hits {
            if !seen.insert(hit.url.clone()) {
                continue;
            }

            let details = match self.scrape_details(&hit.url).await {
                Ok(details) => details,
                Err(e) => {
                    debug!("using search metadata only for {}: {}", hit.url, e);
                    ArticleDetails::default()
                }
            };

            let published_date = details
                .published_date
                .or(hit.published_date)
                .unwrap_or_else(Utc::now);
            if published_date < since {
                debug!("skipping article outside the recency window: {}", hit.title);
                continue;
            }

            let category = classify(
                &format!("{} {} {}", hit.title, hit.description, details.content),
                industry,
            );
            let source = resolve_source(&hit.url);

            articles.push(NewsArticle {
                id: (articles.len() + 1) as i64,
                title: if hit.title.is_empty() {
                    "Untitled Article".to_string()
                } else {
                    hit.title.clone()
                },
                summary: if details.summary.is_empty() {
                    hit.description.clone()
                } else {
                    details.summary
                },
                content: if details.content.is_empty() {
                    hit.description.clone()
                } else {
                    details.content
                },
                image_url: if details.image_url.is_empty() {
                    hit.image_url.clone().unwrap_or_default()
                } else {
                    details.image_url
                },
                url: hit.url,
                published_date,
                author: if details.author.is_empty() {
                    "Unknown".to_string()
                } else {
                    details.author
                },
                source,
                category,
                industry,
                featured: false,
            });

            if articles.len() >= filter.limit {
                break;
            }
        }

        if !articles.is_empty() {
            self.persist_acquired(articles.clone());
        }
        articles
    }

    /// The per-hit pipeline stage: fetch the page, extract structured
    /// fields. Callers fall back to search metadata when this fails.
    async fn scrape_details(&self, url: &str) -> Result<ArticleDetails> {
        let page = self.fetcher.fetch_page(url).await?;
        Ok(extract_details(&page.content, url, page.html.as_deref()))
    }

    /// Write newly acquired articles back to the store without blocking the
    /// response. Duplicate URLs are ignored by the store; write errors are
    /// logged and dropped.
    fn persist_acquired(&self, articles: Vec<NewsArticle>) {
        let store = self.store.clone();
        tokio::spawn(async move {
            for article in &articles {
                if let Err(e) = store.upsert_article(article).await {
                    warn!("failed to persist article {}: {}", article.url, e);
                }
            }
            debug!("persisted {} acquired articles", articles.len());
        });
    }

    pub async fn categories(&self, industry: Industry) -> Vec<NewsCategory> {
        self.store.categories(industry).await.unwrap_or_else(|e| {
            warn!("failed to read categories: {}", e);
            Vec::new()
        })
    }

    pub async fn sources(&self, industry: Industry) -> Vec<NewsSource> {
        self.store.sources(industry).await.unwrap_or_else(|e| {
            warn!("failed to read sources: {}", e);
            Vec::new()
        })
    }

    pub async fn featured_articles(&self, industry: Industry, limit: usize) -> Vec<NewsArticle> {
        self.store
            .featured_articles(industry, limit)
            .await
            .unwrap_or_else(|e| {
                warn!("failed to read featured articles: {}", e);
                Vec::new()
            })
    }

    pub async fn trending_topics(&self, industry: Industry, limit: usize) -> Vec<TrendingTopic> {
        self.store
            .trending_topics(industry, limit)
            .await
            .unwrap_or_else(|e| {
                warn!("failed to read trending topics: {}", e);
                Vec::new()
            })
    }

    pub async fn upcoming_events(&self, industry: Industry, limit: usize) -> Vec<IndustryEvent> {
        let today = Utc::now().date_naive();
        self.store
            .upcoming_events(industry, today, limit)
            .await
            .unwrap_or_else(|e| {
                warn!("failed to read events: {}", e);
                Vec::new()
            })
    }
}

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use vn_core::types::{
    ArticleFilter, Industry, IndustryEvent, NewsArticle, NewsCategory, NewsSource, TrendingTopic,
};
use vn_core::{NewsStore, Result};

#[derive(Default)]
struct Inner {
    articles: Vec<NewsArticle>,
    categories: Vec<NewsCategory>,
    sources: Vec<NewsSource>,
    topics: Vec<TrendingTopic>,
    events: Vec<IndustryEvent>,
    next_article_id: i64,
}

/// In-memory store backend. The default for tests and for running without a
/// database file.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_category(&self, category: NewsCategory) {
        self.inner.write().await.categories.push(category);
    }

    pub async fn insert_source(&self, source: NewsSource) {
        self.inner.write().await.sources.push(source);
    }

    pub async fn insert_topic(&self, topic: TrendingTopic) {
        self.inner.write().await.topics.push(topic);
    }

    pub async fn insert_event(&self, event: IndustryEvent) {
        self.inner.write().await.events.push(event);
    }

    pub async fn article_count(&self) -> usize {
        self.inner.read().await.articles.len()
    }
}

fn matches_filter(article: &NewsArticle, filter: &ArticleFilter) -> bool {
    if let Some(category) = &filter.category {
        if &article.category != category {
            return false;
        }
    }
    if let Some(source) = &filter.source {
        if &article.source != source {
            return false;
        }
    }
    if let Some(term) = &filter.search_term {
        let term = term.to_lowercase();
        if !article.title.to_lowercase().contains(&term)
            && !article.content.to_lowercase().contains(&term)
        {
            return false;
        }
    }
    true
}

#[async_trait]
impl NewsStore for MemoryStore {
    async fn recent_articles(
        &self,
        industry: Industry,
        since: DateTime<Utc>,
        filter: &ArticleFilter,
    ) -> Result<Vec<NewsArticle>> {
        let inner = self.inner.read().await;
        let mut articles: Vec<NewsArticle> = inner
            .articles
            .iter()
            .filter(|a| a.industry == industry && a.published_date >= since)
            .filter(|a| matches_filter(a, filter))
            .cloned()
            .collect();
        articles.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        articles.truncate(filter.limit);
        Ok(articles)
    }

    async fn featured_articles(
        &self,
        industry: Industry,
        limit: usize,
    ) -> Result<Vec<NewsArticle>> {
        let inner = self.inner.read().await;
        let mut articles: Vec<NewsArticle> = inner
            .articles
            .iter()
            .filter(|a| a.industry == industry && a.featured)
            .cloned()
            .collect();
        articles.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        articles.truncate(limit);
        Ok(articles)
    }

    async fn upsert_article(&self, article: &NewsArticle) -> Result<()> {
        let mut inner = self.inner.write().await;
        // First writer wins; a duplicate URL is silently ignored.
        if inner.articles.iter().any(|a| a.url == article.url) {
            return Ok(());
        }
        inner.next_article_id += 1;
        let mut stored = article.clone();
        stored.id = inner.next_article_id;
        inner.articles.push(stored);
        Ok(())
    }

    async fn categories(&self, industry: Industry) -> Result<Vec<NewsCategory>> {
        let inner = self.inner.read().await;
        Ok(inner
            .categories
            .iter()
            .filter(|c| c.industry == industry)
            .cloned()
            .collect())
    }

    async fn sources(&self, industry: Industry) -> Result<Vec<NewsSource>> {
        let inner = self.inner.read().await;
        Ok(inner
            .sources
            .iter()
            .filter(|s| s.industry == industry)
            .cloned()
            .collect())
    }

    async fn trending_topics(
        &self,
        industry: Industry,
        limit: usize,
    ) -> Result<Vec<TrendingTopic>> {
        let inner = self.inner.read().await;
        let mut topics: Vec<TrendingTopic> = inner
            .topics
            .iter()
            .filter(|t| t.industry == industry)
            .cloned()
            .collect();
        topics.sort_by(|a, b| b.popularity.cmp(&a.popularity));
        topics.truncate(limit);
        Ok(topics)
    }

    async fn upcoming_events(
        &self,
        industry: Industry,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<IndustryEvent>> {
        let inner = self.inner.read().await;
        let mut events: Vec<IndustryEvent> = inner
            .events
            .iter()
            .filter(|e| e.industry == industry && e.start_date >= from)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        events.truncate(limit);
        Ok(events)
    }
}

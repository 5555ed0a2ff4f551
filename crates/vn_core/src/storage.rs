use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::types::{
    ArticleFilter, Industry, IndustryEvent, NewsArticle, NewsCategory, NewsSource, TrendingTopic,
};
use crate::Result;

/// Persisted store over the five logical news tables. Writes are
/// insert-or-ignore keyed by `url`; concurrent callers racing to insert the
/// same URL are resolved by the backend's conflict policy, not by in-process
/// locking.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Articles for an industry published at or after `since`, optionally
    /// narrowed by category, source, and a case-insensitive substring match
    /// of `search_term` on title or content. Newest first, capped at
    /// `filter.limit`.
    async fn recent_articles(
        &self,
        industry: Industry,
        since: DateTime<Utc>,
        filter: &ArticleFilter,
    ) -> Result<Vec<NewsArticle>>;

    /// Articles flagged for prominent placement, newest first.
    async fn featured_articles(&self, industry: Industry, limit: usize)
        -> Result<Vec<NewsArticle>>;

    /// Insert the article unless a row with the same `url` already exists.
    /// First writer wins; a duplicate is not an error.
    async fn upsert_article(&self, article: &NewsArticle) -> Result<()>;

    async fn categories(&self, industry: Industry) -> Result<Vec<NewsCategory>>;

    async fn sources(&self, industry: Industry) -> Result<Vec<NewsSource>>;

    /// Trending topics by descending popularity.
    async fn trending_topics(&self, industry: Industry, limit: usize)
        -> Result<Vec<TrendingTopic>>;

    /// Events starting on or after `from`, soonest first.
    async fn upcoming_events(
        &self,
        industry: Industry,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<IndustryEvent>>;
}

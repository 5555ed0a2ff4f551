use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use vn_core::types::{
    ArticleFilter, Industry, IndustryEvent, NewsArticle, NewsCategory, NewsSource, TrendingTopic,
};
use vn_core::{Error, NewsStore, Result};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS news_articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        summary TEXT NOT NULL,
        content TEXT NOT NULL,
        image_url TEXT NOT NULL,
        url TEXT NOT NULL UNIQUE,
        published_date TEXT NOT NULL,
        author TEXT NOT NULL,
        source TEXT NOT NULL,
        category TEXT NOT NULL,
        industry TEXT NOT NULL,
        featured INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS news_categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        industry TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS news_sources (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        url TEXT NOT NULL,
        industry TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS trending_topics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        topic TEXT NOT NULL,
        industry TEXT NOT NULL,
        popularity INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS industry_events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        location TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        url TEXT NOT NULL,
        industry TEXT NOT NULL
    )
    "#,
    // Add future migrations here
];

/// SQLite-backed store. Duplicate-URL writes are resolved by the database
/// itself via `INSERT OR IGNORE`.
pub struct SqliteStore {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

impl SqliteStore {
    pub async fn new() -> Result<Self> {
        Self::new_with_path(Path::new("news.db")).await
    }

    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let pool = SqlitePool::connect(&format!("sqlite://{}?mode=rwc", db_path.display()))
            .await
            .map_err(|e| Error::Storage(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Storage(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self {
            pool: Arc::new(pool),
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Storage(format!("Failed to parse timestamp '{}': {}", raw, e)))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| Error::Storage(format!("Failed to parse date '{}': {}", raw, e)))
}

fn parse_industry(raw: &str) -> Result<Industry> {
    raw.parse()
        .map_err(|_| Error::Storage(format!("Unknown industry in row: {}", raw)))
}

fn row_to_article(row: &sqlx::sqlite::SqliteRow) -> Result<NewsArticle> {
    Ok(NewsArticle {
        id: row.get("id"),
        title: row.get("title"),
        summary: row.get("summary"),
        content: row.get("content"),
        image_url: row.get("image_url"),
        url: row.get("url"),
        published_date: parse_timestamp(&row.get::<String, _>("published_date"))?,
        author: row.get("author"),
        source: row.get("source"),
        category: row.get("category"),
        industry: parse_industry(&row.get::<String, _>("industry"))?,
        featured: row.get::<i64, _>("featured") != 0,
    })
}

#[async_trait]
impl NewsStore for SqliteStore {
    async fn recent_articles(
        &self,
        industry: Industry,
        since: DateTime<Utc>,
        filter: &ArticleFilter,
    ) -> Result<Vec<NewsArticle>> {
        let mut sql = String::from(
            "SELECT * FROM news_articles WHERE industry = ? AND published_date >= ?",
        );
        if filter.category.is_some() {
            sql.push_str(" AND category = ?");
        }
        if filter.source.is_some() {
            sql.push_str(" AND source = ?");
        }
        if filter.search_term.is_some() {
            sql.push_str(" AND (LOWER(title) LIKE ? OR LOWER(content) LIKE ?)");
        }
        sql.push_str(" ORDER BY published_date DESC LIMIT ?");

        let mut query = sqlx::query(&sql)
            .bind(industry.as_str())
            .bind(since.to_rfc3339());
        if let Some(category) = &filter.category {
            query = query.bind(category);
        }
        if let Some(source) = &filter.source {
            query = query.bind(source);
        }
        if let Some(term) = &filter.search_term {
            let pattern = format!("%{}%", term.to_lowercase());
            query = query.bind(pattern.clone()).bind(pattern);
        }
        let rows = query
            .bind(filter.limit as i64)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Failed to read articles: {}", e)))?;

        rows.iter().map(row_to_article).collect()
    }

    async fn featured_articles(
        &self,
        industry: Industry,
        limit: usize,
    ) -> Result<Vec<NewsArticle>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM news_articles
            WHERE industry = ? AND featured = 1
            ORDER BY published_date DESC
            LIMIT ?
            "#,
        )
        .bind(industry.as_str())
        .bind(limit as i64)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::Storage(format!("Failed to read featured articles: {}", e)))?;

        rows.iter().map(row_to_article).collect()
    }

    async fn upsert_article(&self, article: &NewsArticle) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO news_articles
            (title, summary, content, image_url, url, published_date,
             author, source, category, industry, featured)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.title)
        .bind(&article.summary)
        .bind(&article.content)
        .bind(&article.image_url)
        .bind(&article.url)
        .bind(article.published_date.to_rfc3339())
        .bind(&article.author)
        .bind(&article.source)
        .bind(&article.category)
        .bind(article.industry.as_str())
        .bind(article.featured as i64)
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Storage(format!("Failed to store article: {}", e)))?;

        Ok(())
    }

    async fn categories(&self, industry: Industry) -> Result<Vec<NewsCategory>> {
        let rows = sqlx::query("SELECT * FROM news_categories WHERE industry = ?")
            .bind(industry.as_str())
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Failed to read categories: {}", e)))?;

        rows.iter()
            .map(|row| {
                Ok(NewsCategory {
                    id: row.get("id"),
                    name: row.get("name"),
                    industry: parse_industry(&row.get::<String, _>("industry"))?,
                })
            })
            .collect()
    }

    async fn sources(&self, industry: Industry) -> Result<Vec<NewsSource>> {
        let rows = sqlx::query("SELECT * FROM news_sources WHERE industry = ?")
            .bind(industry.as_str())
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Failed to read sources: {}", e)))?;

        rows.iter()
            .map(|row| {
                Ok(NewsSource {
                    id: row.get("id"),
                    name: row.get("name"),
                    url: row.get("url"),
                    industry: parse_industry(&row.get::<String, _>("industry"))?,
                })
            })
            .collect()
    }

    async fn trending_topics(
        &self,
        industry: Industry,
        limit: usize,
    ) -> Result<Vec<TrendingTopic>> {
        let rows = sqlx::query(
            "SELECT * FROM trending_topics WHERE industry = ? ORDER BY popularity DESC LIMIT ?",
        )
        .bind(industry.as_str())
        .bind(limit as i64)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::Storage(format!("Failed to read trending topics: {}", e)))?;

        rows.iter()
            .map(|row| {
                Ok(TrendingTopic {
                    id: row.get("id"),
                    topic: row.get("topic"),
                    industry: parse_industry(&row.get::<String, _>("industry"))?,
                    popularity: row.get("popularity"),
                })
            })
            .collect()
    }

    async fn upcoming_events(
        &self,
        industry: Industry,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<IndustryEvent>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM industry_events
            WHERE industry = ? AND start_date >= ?
            ORDER BY start_date ASC
            LIMIT ?
            "#,
        )
        .bind(industry.as_str())
        .bind(from.to_string())
        .bind(limit as i64)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| Error::Storage(format!("Failed to read events: {}", e)))?;

        rows.iter()
            .map(|row| {
                Ok(IndustryEvent {
                    id: row.get("id"),
                    name: row.get("name"),
                    location: row.get("location"),
                    start_date: parse_date(&row.get::<String, _>("start_date"))?,
                    end_date: parse_date(&row.get::<String, _>("end_date"))?,
                    url: row.get("url"),
                    industry: parse_industry(&row.get::<String, _>("industry"))?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::tempdir;
    use vn_core::types::ArticleFilter;

    fn article(url: &str, title: &str) -> NewsArticle {
        NewsArticle {
            id: 0,
            title: title.to_string(),
            summary: "A summary".to_string(),
            content: "Laser treatment adoption is growing".to_string(),
            image_url: String::new(),
            url: url.to_string(),
            published_date: Utc::now() - Duration::days(1),
            author: "Test Author".to_string(),
            source: "Medicalnews".to_string(),
            category: "Treatments".to_string(),
            industry: Industry::Aesthetic,
            featured: false,
        }
    }

    #[tokio::test]
    async fn duplicate_url_keeps_first_row() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::new_with_path(&dir.path().join("test.db"))
            .await
            .unwrap();

        store
            .upsert_article(&article("https://e.com/a", "First"))
            .await
            .unwrap();
        store
            .upsert_article(&article("https://e.com/a", "Second"))
            .await
            .unwrap();

        let since = Utc::now() - Duration::days(7);
        let articles = store
            .recent_articles(Industry::Aesthetic, since, &ArticleFilter::default())
            .await
            .unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "First");
    }

    #[tokio::test]
    async fn search_term_matches_title_or_content() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::new_with_path(&dir.path().join("test.db"))
            .await
            .unwrap();

        store
            .upsert_article(&article("https://e.com/a", "Filler roundup"))
            .await
            .unwrap();
        store
            .upsert_article(&article("https://e.com/b", "Skincare update"))
            .await
            .unwrap();

        let since = Utc::now() - Duration::days(7);
        let filter = ArticleFilter {
            search_term: Some("FILLER".to_string()),
            ..Default::default()
        };
        let matched = store
            .recent_articles(Industry::Aesthetic, since, &filter)
            .await
            .unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "Filler roundup");

        // Content matches too.
        let filter = ArticleFilter {
            search_term: Some("laser".to_string()),
            ..Default::default()
        };
        let matched = store
            .recent_articles(Industry::Aesthetic, since, &filter)
            .await
            .unwrap();
        assert_eq!(matched.len(), 2);
    }
}

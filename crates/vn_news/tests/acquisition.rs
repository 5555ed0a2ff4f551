use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;

use vn_core::types::{ArticleFilter, Industry, NewsArticle, SearchHit};
use vn_core::{NewsStore, Result};
use vn_news::fetch::{PageFetcher, ScrapedPage};
use vn_news::search::{SearchAdapter, SearchBackend};
use vn_news::{MockGenerator, NewsService};
use vn_storage::MemoryStore;

struct FixedSearch {
    hits: Vec<SearchHit>,
}

#[async_trait]
impl SearchBackend for FixedSearch {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn search(&self, _query: &str, count: usize) -> Result<Vec<SearchHit>> {
        Ok(self.hits.iter().take(count).cloned().collect())
    }
}

struct NoPages;

#[async_trait]
impl PageFetcher for NoPages {
    async fn fetch_page(&self, _url: &str) -> Result<ScrapedPage> {
        Err(vn_core::Error::Extraction("offline".to_string()))
    }
}

fn seed_article(url: &str, days_ago: i64) -> NewsArticle {
    NewsArticle {
        id: 0,
        title: format!("Seeded {}", url),
        summary: "Seeded summary".to_string(),
        content: "Seeded content on patient care".to_string(),
        image_url: String::new(),
        url: url.to_string(),
        published_date: Utc::now() - Duration::days(days_ago),
        author: "Staff".to_string(),
        source: "Dentistrytoday".to_string(),
        category: "Clinical".to_string(),
        industry: Industry::Dental,
        featured: false,
    }
}

fn hit(url: &str) -> SearchHit {
    SearchHit {
        title: "Practice software market update".to_string(),
        url: url.to_string(),
        description: "Revenue growth across the industry".to_string(),
        image_url: None,
        published_date: None,
    }
}

#[tokio::test]
async fn acquired_articles_land_in_the_store_and_serve_the_next_read() {
    let store = Arc::new(MemoryStore::new());
    store
        .upsert_article(&seed_article("https://a.com/1", 1))
        .await
        .unwrap();
    store
        .upsert_article(&seed_article("https://a.com/2", 2))
        .await
        .unwrap();

    let adapter = SearchAdapter::new(vec![Box::new(FixedSearch {
        hits: vec![hit("https://b.com/fresh")],
    })]);
    let service = NewsService::new(store.clone(), adapter, Arc::new(NoPages))
        .with_mock_generator(MockGenerator::with_seed(9));

    let filter = ArticleFilter {
        limit: 3,
        ..Default::default()
    };
    let articles = service.articles(Industry::Dental, &filter).await;
    assert_eq!(articles.len(), 3);
    assert_eq!(articles[2].url, "https://b.com/fresh");
    assert_eq!(articles[2].source, "B");
    assert_eq!(articles[2].category, "Business");

    // The acquired article is written back in the background.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(store.article_count().await, 3);

    // A second read is satisfied from the store alone, and re-upserting the
    // same URL stays idempotent.
    let again = service.articles(Industry::Dental, &filter).await;
    assert_eq!(again.len(), 3);
    assert!(again.iter().any(|a| a.url == "https://b.com/fresh"));
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(store.article_count().await, 3);
}

#[tokio::test]
async fn empty_world_yields_exactly_limit_mock_articles() {
    for industry in Industry::ALL {
        for limit in [0usize, 1, 5, 10] {
            let store = Arc::new(MemoryStore::new());
            let adapter = SearchAdapter::new(Vec::new());
            let service = NewsService::new(store, adapter, Arc::new(NoPages))
                .with_mock_generator(MockGenerator::with_seed(4));

            let filter = ArticleFilter {
                limit,
                ..Default::default()
            };
            let articles = service.articles(industry, &filter).await;
            assert_eq!(articles.len(), limit);
            assert!(articles.iter().all(|a| a.industry == industry));
        }
    }
}

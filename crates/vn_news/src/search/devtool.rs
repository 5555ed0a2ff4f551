use async_trait::async_trait;
use std::sync::Arc;

use super::SearchBackend;
use vn_core::config::{Environment, SearchConfig};
use vn_core::types::SearchHit;
use vn_core::Result;

/// The optional scrape-search capability of the execution environment. Hosts
/// that carry a search-and-scrape tool inject an implementation; everyone
/// else leaves it absent.
#[async_trait]
pub trait ScrapeSearch: Send + Sync {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchHit>>;
}

/// Development-only search backend wrapping an injected [`ScrapeSearch`]
/// capability. Unavailable in production, when the capability is absent, or
/// when disabled by configuration.
pub struct ScrapeSearchBackend {
    capability: Option<Arc<dyn ScrapeSearch>>,
    environment: Environment,
    enabled: bool,
}

impl ScrapeSearchBackend {
    pub fn new(config: &SearchConfig, capability: Option<Arc<dyn ScrapeSearch>>) -> Self {
        Self {
            capability,
            environment: config.environment,
            enabled: config.scrape_search_enabled,
        }
    }
}

#[async_trait]
impl SearchBackend for ScrapeSearchBackend {
    fn name(&self) -> &'static str {
        "scrape-search"
    }

    fn is_available(&self) -> bool {
        self.enabled && self.environment == Environment::Development && self.capability.is_some()
    }

    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchHit>> {
        match &self.capability {
            Some(capability) if self.is_available() => capability.search(query, count).await,
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubCapability;

    #[async_trait]
    impl ScrapeSearch for StubCapability {
        async fn search(&self, _query: &str, count: usize) -> Result<Vec<SearchHit>> {
            Ok((0..count)
                .map(|i| SearchHit {
                    title: format!("hit {}", i),
                    url: format!("https://scraped.example.com/{}", i),
                    description: "scraped".to_string(),
                    image_url: Some("https://scraped.example.com/img.jpg".to_string()),
                    published_date: None,
                })
                .collect())
        }
    }

    fn dev_config() -> SearchConfig {
        SearchConfig {
            environment: Environment::Development,
            scrape_search_enabled: true,
            api_key: None,
        }
    }

    #[tokio::test]
    async fn available_only_in_dev_with_capability() {
        let with_cap = ScrapeSearchBackend::new(&dev_config(), Some(Arc::new(StubCapability)));
        assert!(with_cap.is_available());
        assert_eq!(with_cap.search("q", 3).await.unwrap().len(), 3);

        let without_cap = ScrapeSearchBackend::new(&dev_config(), None);
        assert!(!without_cap.is_available());
        assert!(without_cap.search("q", 3).await.unwrap().is_empty());

        let mut prod = dev_config();
        prod.environment = Environment::Production;
        let in_prod = ScrapeSearchBackend::new(&prod, Some(Arc::new(StubCapability)));
        assert!(!in_prod.is_available());
        assert!(in_prod.search("q", 3).await.unwrap().is_empty());

        let mut disabled = dev_config();
        disabled.scrape_search_enabled = false;
        let off = ScrapeSearchBackend::new(&disabled, Some(Arc::new(StubCapability)));
        assert!(!off.is_available());
    }
}

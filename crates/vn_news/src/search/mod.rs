use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Mutex;
use tracing::{debug, warn};

use vn_core::types::{ArticleFilter, Industry, SearchHit};
use vn_core::Result;

pub mod brave;
pub mod devtool;

pub use brave::BraveSearchBackend;
pub use devtool::{ScrapeSearch, ScrapeSearchBackend};

/// One web-search backend. Backends report their own availability (missing
/// key, wrong environment) so the adapter can skip them without treating the
/// gap as an error.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool;

    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchHit>>;
}

/// How the adapter picks the order in which to try its backends.
pub enum SelectionStrategy {
    /// Try backends in registration order.
    Ordered,
    /// Shuffle the try-order per call from a seedable random source.
    Randomized(Mutex<StdRng>),
}

/// Tries backends until one yields results. Never raises: backend errors are
/// logged and the next backend is tried; exhaustion yields an empty list.
pub struct SearchAdapter {
    backends: Vec<Box<dyn SearchBackend>>,
    strategy: SelectionStrategy,
}

impl SearchAdapter {
    pub fn new(backends: Vec<Box<dyn SearchBackend>>) -> Self {
        Self {
            backends,
            strategy: SelectionStrategy::Ordered,
        }
    }

    pub fn randomized(backends: Vec<Box<dyn SearchBackend>>, seed: u64) -> Self {
        Self {
            backends,
            strategy: SelectionStrategy::Randomized(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    fn try_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.backends.len()).collect();
        if let SelectionStrategy::Randomized(rng) = &self.strategy {
            let mut rng = rng.lock().expect("search rng lock poisoned");
            order.shuffle(&mut *rng);
        }
        order
    }

    pub async fn search(&self, query: &str, count: usize) -> Vec<SearchHit> {
        for index in self.try_order() {
            let backend = &self.backends[index];
            if !backend.is_available() {
                debug!("search backend {} unavailable, skipping", backend.name());
                continue;
            }
            match backend.search(query, count).await {
                Ok(hits) if !hits.is_empty() => {
                    debug!("{} returned {} hits", backend.name(), hits.len());
                    return hits;
                }
                Ok(_) => {
                    debug!("{} returned no hits", backend.name());
                }
                Err(e) => {
                    warn!("search backend {} failed: {}", backend.name(), e);
                }
            }
        }
        Vec::new()
    }
}

/// Build the web-search query for an industry and filter: the base phrase,
/// then category, source, search term, and a fixed recency hint, in that
/// order, space-joined.
pub fn build_search_query(industry: Industry, filter: &ArticleFilter) -> String {
    let mut query = format!("{} industry news", industry);
    for part in [&filter.category, &filter.source, &filter.search_term]
        .into_iter()
        .flatten()
    {
        query.push(' ');
        query.push_str(part);
    }
    query.push_str(" past week");
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use vn_core::Error;

    struct StubBackend {
        name: &'static str,
        available: bool,
        outcome: std::result::Result<usize, ()>,
    }

    #[async_trait]
    impl SearchBackend for StubBackend {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_available(&self) -> bool {
            self.available
        }

        async fn search(&self, _query: &str, _count: usize) -> Result<Vec<SearchHit>> {
            match self.outcome {
                Ok(n) => Ok((0..n)
                    .map(|i| SearchHit {
                        title: format!("{} hit {}", self.name, i),
                        url: format!("https://{}.example.com/{}", self.name, i),
                        description: String::new(),
                        image_url: None,
                        published_date: None,
                    })
                    .collect()),
                Err(()) => Err(Error::Search(format!("{} exploded", self.name))),
            }
        }
    }

    #[test]
    fn query_parts_join_in_order() {
        let filter = ArticleFilter {
            limit: 10,
            category: Some("Technology".to_string()),
            source: Some("Dentistrytoday".to_string()),
            search_term: Some("implants".to_string()),
        };
        assert_eq!(
            build_search_query(Industry::Dental, &filter),
            "dental industry news Technology Dentistrytoday implants past week"
        );
        assert_eq!(
            build_search_query(Industry::Aesthetic, &ArticleFilter::default()),
            "aesthetic industry news past week"
        );
    }

    #[tokio::test]
    async fn adapter_falls_through_to_the_next_backend() {
        let adapter = SearchAdapter::new(vec![
            Box::new(StubBackend {
                name: "gated",
                available: false,
                outcome: Ok(5),
            }),
            Box::new(StubBackend {
                name: "broken",
                available: true,
                outcome: Err(()),
            }),
            Box::new(StubBackend {
                name: "empty",
                available: true,
                outcome: Ok(0),
            }),
            Box::new(StubBackend {
                name: "working",
                available: true,
                outcome: Ok(2),
            }),
        ]);
        let hits = adapter.search("dental industry news past week", 10).await;
        assert_eq!(hits.len(), 2);
        assert!(hits[0].url.contains("working"));
    }

    #[tokio::test]
    async fn adapter_exhaustion_is_an_empty_result() {
        let adapter = SearchAdapter::new(vec![Box::new(StubBackend {
            name: "broken",
            available: true,
            outcome: Err(()),
        })]);
        assert!(adapter.search("anything", 10).await.is_empty());
    }

    #[tokio::test]
    async fn randomized_strategy_still_finds_the_working_backend() {
        let adapter = SearchAdapter::randomized(
            vec![
                Box::new(StubBackend {
                    name: "empty",
                    available: true,
                    outcome: Ok(0),
                }),
                Box::new(StubBackend {
                    name: "working",
                    available: true,
                    outcome: Ok(1),
                }),
            ],
            1234,
        );
        for _ in 0..4 {
            assert_eq!(adapter.search("q", 5).await.len(), 1);
        }
    }
}

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use super::SearchBackend;
use vn_core::config::SearchConfig;
use vn_core::types::SearchHit;
use vn_core::Result;

const DEFAULT_ENDPOINT: &str = "https://api.search.brave.com/res/v1/web/search";

/// The Brave web-search API accepts at most this many results per call.
const MAX_COUNT: usize = 20;

/// Keyed REST web-search backend. A missing key makes the backend
/// unavailable rather than erroring; a non-success response is an empty
/// result.
pub struct BraveSearchBackend {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

#[derive(Debug, Deserialize, Default)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWeb>,
}

#[derive(Debug, Deserialize, Default)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    #[serde(default)]
    title: String,
    url: String,
    #[serde(default)]
    description: String,
}

fn effective_count(count: usize) -> usize {
    count.min(MAX_COUNT)
}

impl BraveSearchBackend {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    #[cfg(test)]
    fn with_endpoint(api_key: Option<String>, endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint,
        }
    }
}

#[async_trait]
impl SearchBackend for BraveSearchBackend {
    fn name(&self) -> &'static str {
        "brave"
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchHit>> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => return Ok(Vec::new()),
        };

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("count", &effective_count(count).to_string())])
            .header("Accept", "application/json")
            .header("X-Subscription-Token", api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("brave search request failed with status {}", response.status());
            return Ok(Vec::new());
        }

        let body: BraveResponse = response.json().await?;
        let results = body.web.map(|web| web.results).unwrap_or_default();

        Ok(results
            .into_iter()
            .map(|result| SearchHit {
                title: result.title,
                url: result.url,
                description: result.description,
                image_url: None,
                published_date: None,
            })
            .collect())
    }
}

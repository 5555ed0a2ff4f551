use std::time::Duration;

/// Runtime environment. The scrape-search backend is a development-only
/// capability and must never run in production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Configuration handed to the search adapter at construction. The library
/// never reads process environment variables; the binary translates them
/// into this struct once at startup.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub environment: Environment,
    pub scrape_search_enabled: bool,
    pub api_key: Option<String>,
}

impl SearchConfig {
    pub fn disabled() -> Self {
        Self {
            environment: Environment::Production,
            scrape_search_enabled: false,
            api_key: None,
        }
    }
}

/// Tunables for the acquisition pipeline.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Articles returned by live search must be at most this many days old.
    pub recency_days: i64,
    /// Bound on any single article-detail fetch so one slow source cannot
    /// stall the whole batch.
    pub scrape_timeout: Duration,
    pub default_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            recency_days: 7,
            scrape_timeout: Duration::from_secs(10),
            default_limit: 10,
        }
    }
}

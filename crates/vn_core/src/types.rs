use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The two verticals all content is segmented by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    Dental,
    Aesthetic,
}

impl Industry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Dental => "dental",
            Industry::Aesthetic => "aesthetic",
        }
    }

    pub const ALL: [Industry; 2] = [Industry::Dental, Industry::Aesthetic];
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Industry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dental" => Ok(Industry::Dental),
            "aesthetic" => Ok(Industry::Aesthetic),
            other => Err(Error::UnknownIndustry(other.to_string())),
        }
    }
}

/// A fully assembled news article, either read from the store, built from a
/// search hit, or synthesized by the mock generator. `url` is the natural
/// deduplication key across all three origins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image_url: String,
    pub url: String,
    pub published_date: DateTime<Utc>,
    pub author: String,
    pub source: String,
    pub category: String,
    pub industry: Industry,
    pub featured: bool,
}

/// One normalized result from a web-search backend. Consumed immediately by
/// the orchestrator and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub description: String,
    pub image_url: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
}

/// Fields extracted from a scraped article page, merged into a
/// [`NewsArticle`] by the orchestrator. Every field has a defined default.
#[derive(Debug, Clone, Default)]
pub struct ArticleDetails {
    pub summary: String,
    pub content: String,
    pub image_url: String,
    pub published_date: Option<DateTime<Utc>>,
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsCategory {
    pub id: i64,
    pub name: String,
    pub industry: Industry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSource {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub industry: Industry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub id: i64,
    pub topic: String,
    pub industry: Industry,
    pub popularity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryEvent {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub url: String,
    pub industry: Industry,
}

/// Query descriptor for article reads. Not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleFilter {
    pub limit: usize,
    pub category: Option<String>,
    pub source: Option<String>,
    pub search_term: Option<String>,
}

impl Default for ArticleFilter {
    fn default() -> Self {
        Self {
            limit: 10,
            category: None,
            source: None,
            search_term: None,
        }
    }
}

impl ArticleFilter {
    pub fn with_limit(&self, limit: usize) -> Self {
        Self {
            limit,
            ..self.clone()
        }
    }
}

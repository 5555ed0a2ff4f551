pub mod config;
pub mod error;
pub mod storage;
pub mod types;

pub use config::{Environment, SearchConfig, ServiceConfig};
pub use error::Error;
pub use storage::NewsStore;
pub use types::{
    ArticleDetails, ArticleFilter, Industry, IndustryEvent, NewsArticle, NewsCategory, NewsSource,
    SearchHit, TrendingTopic,
};

pub type Result<T> = std::result::Result<T, Error>;

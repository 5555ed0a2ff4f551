use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use crate::AppState;
use vn_core::types::{
    ArticleFilter, Industry, IndustryEvent, NewsArticle, NewsCategory, NewsSource, TrendingTopic,
};

const DEFAULT_FEATURED_LIMIT: usize = 3;
const DEFAULT_TRENDING_LIMIT: usize = 5;
const DEFAULT_EVENTS_LIMIT: usize = 5;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub category: Option<String>,
    pub source: Option<String>,
    pub search: Option<String>,
}

// The dashboard contract is "an array, never an error": an unknown industry
// yields an empty list rather than a 4xx.
fn parse_industry(raw: &str) -> Option<Industry> {
    Industry::from_str(raw).ok()
}

pub async fn articles(
    State(state): State<Arc<AppState>>,
    Path(industry): Path<String>,
    Query(params): Query<ListParams>,
) -> Json<Vec<NewsArticle>> {
    let Some(industry) = parse_industry(&industry) else {
        return Json(Vec::new());
    };
    let filter = ArticleFilter {
        limit: params.limit.unwrap_or(state.service.config().default_limit),
        category: params.category,
        source: params.source,
        search_term: params.search,
    };
    Json(state.service.articles(industry, &filter).await)
}

pub async fn categories(
    State(state): State<Arc<AppState>>,
    Path(industry): Path<String>,
) -> Json<Vec<NewsCategory>> {
    let Some(industry) = parse_industry(&industry) else {
        return Json(Vec::new());
    };
    Json(state.service.categories(industry).await)
}

pub async fn sources(
    State(state): State<Arc<AppState>>,
    Path(industry): Path<String>,
) -> Json<Vec<NewsSource>> {
    let Some(industry) = parse_industry(&industry) else {
        return Json(Vec::new());
    };
    Json(state.service.sources(industry).await)
}

pub async fn featured(
    State(state): State<Arc<AppState>>,
    Path(industry): Path<String>,
    Query(params): Query<ListParams>,
) -> Json<Vec<NewsArticle>> {
    let Some(industry) = parse_industry(&industry) else {
        return Json(Vec::new());
    };
    let limit = params.limit.unwrap_or(DEFAULT_FEATURED_LIMIT);
    Json(state.service.featured_articles(industry, limit).await)
}

pub async fn trending(
    State(state): State<Arc<AppState>>,
    Path(industry): Path<String>,
    Query(params): Query<ListParams>,
) -> Json<Vec<TrendingTopic>> {
    let Some(industry) = parse_industry(&industry) else {
        return Json(Vec::new());
    };
    let limit = params.limit.unwrap_or(DEFAULT_TRENDING_LIMIT);
    Json(state.service.trending_topics(industry, limit).await)
}

pub async fn events(
    State(state): State<Arc<AppState>>,
    Path(industry): Path<String>,
    Query(params): Query<ListParams>,
) -> Json<Vec<IndustryEvent>> {
    let Some(industry) = parse_industry(&industry) else {
        return Json(Vec::new());
    };
    let limit = params.limit.unwrap_or(DEFAULT_EVENTS_LIMIT);
    Json(state.service.upcoming_events(industry, limit).await)
}

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/:industry/articles", get(handlers::articles))
        .route("/api/:industry/categories", get(handlers::categories))
        .route("/api/:industry/sources", get(handlers::sources))
        .route("/api/:industry/featured", get(handlers::featured))
        .route("/api/:industry/trending", get(handlers::trending))
        .route("/api/:industry/events", get(handlers::events))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use vn_core::{NewsArticle, Result};
}

use std::sync::Arc;
use vn_news::NewsService;

pub struct AppState {
    pub service: Arc<NewsService>,
}

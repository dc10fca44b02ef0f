use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::scraper::ScrapeService;

mod routes;

#[derive(Clone)]
pub struct AppState {
    pub service: ScrapeService,
}

pub fn build_router(state: AppState) -> Router {
    routes::api_router()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub mod health;
pub mod search;

use std::sync::Arc;

use axum::http::{header::CONTENT_TYPE, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::scrapers::SearchExecutor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<dyn SearchExecutor>,
}

/// Build the axum application router
pub fn build_router(executor: Arc<dyn SearchExecutor>) -> Router {
    // Permissive CORS for development use.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route(
            "/search",
            get(search::search_get).post(search::search_post),
        )
        .route("/health", get(health::health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { executor })
}

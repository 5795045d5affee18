use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod state;
pub mod view;

pub use bootstrap::{AssetSet, Component, PageShell};
pub use error::ApiError;
pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/analyze", post(handlers::analyze))
        .route("/report", get(handlers::report_page))
        .route("/api/report", post(handlers::report))
        .route("/api/sample/analysis", get(handlers::get_sample_analysis))
        .route("/api/sample/recommendations", get(handlers::get_sample_recommendations))
        .route("/static/style.css", get(handlers::stylesheet))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use wt_core::{ArticleAnalysis, Error, Result, TrustReport};
    pub use crate::bootstrap::{AssetSet, PageShell};
    pub use crate::AppState;
}

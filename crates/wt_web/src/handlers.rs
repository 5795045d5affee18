use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wt_core::{sample_analysis, sample_recommendations, sample_report, ArticleAnalysis, TrustReport};

use crate::error::ApiError;
use crate::view::ReportView;
use crate::AppState;

const STYLESHEET: &str = include_str!("../static/style.css");

#[derive(Debug, Serialize)]
pub struct Health {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub title: String,
}

fn title_of(title: &str) -> Result<&str, ApiError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }
    Ok(title)
}

pub async fn health() -> impl IntoResponse {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<ArticleAnalysis>, ApiError> {
    let report = state.report(title_of(&req.title)?).await?;
    Ok(Json(report.analysis))
}

pub async fn report(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<TrustReport>, ApiError> {
    let report = state.report(title_of(&req.title)?).await?;
    Ok(Json(report))
}

pub async fn get_sample_analysis() -> impl IntoResponse {
    Json(sample_analysis())
}

pub async fn get_sample_recommendations() -> impl IntoResponse {
    Json(sample_recommendations())
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let report = sample_report();
    Html(state.shell.mount(&ReportView::new(&report)))
}

pub async fn report_page(
    State(state): State<Arc<AppState>>,
    Query(req): Query<AnalyzeRequest>,
) -> Result<Html<String>, ApiError> {
    let report = state.report(title_of(&req.title)?).await?;
    Ok(Html(state.shell.mount(&ReportView::new(&report))))
}

pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

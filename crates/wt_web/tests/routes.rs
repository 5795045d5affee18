use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use wt_core::{sample_report, AnalysisSource, Error, Result, TrustReport, Violation};
use wt_web::bootstrap::{DEFAULT_MOUNT_ID, DEFAULT_TEMPLATE};
use wt_web::{create_app, AppState, AssetSet, PageShell};

enum Behaviour {
    Live,
    Unreachable,
    Inconsistent,
    Missing,
}

struct StubSource(Behaviour);

#[async_trait]
impl AnalysisSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn analyze(&self, title: &str) -> Result<TrustReport> {
        match self.0 {
            Behaviour::Live => {
                let mut record = sample_report().analysis.into_record();
                record.title = title.to_string();
                Ok(TrustReport {
                    analysis: wt_core::ArticleAnalysis::new(record)?,
                    recommendations: sample_report().recommendations,
                })
            }
            Behaviour::Unreachable => Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
            Behaviour::Inconsistent => Err(Error::Validation(vec![Violation::LivingAndDead])),
            Behaviour::Missing => Err(Error::NotFound(title.to_string())),
        }
    }
}

fn state(behaviour: Behaviour) -> AppState {
    let shell =
        PageShell::bootstrap(DEFAULT_TEMPLATE, DEFAULT_MOUNT_ID, AssetSet::default()).unwrap();
    AppState::new(Arc::new(StubSource(behaviour)), shell)
}

async fn app(state: AppState) -> Router {
    create_app(state).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = get(app(state(Behaviour::Live)).await, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn analyze_returns_the_data_contract() {
    let (status, body) = post_json(
        app(state(Behaviour::Live)).await,
        "/analyze",
        json!({"title": "  Nairobi "}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Nairobi");
    for field in [
        "url",
        "ai_content_risk",
        "broken_links_count",
        "broken_external_links",
        "content_type",
        "total_links_internal",
        "total_links_external",
        "internal_links",
        "external_links",
        "categories",
        "is_living",
        "is_dead",
        "death_year",
        "birth_year",
        "is_stub",
        "ai_explanation",
    ] {
        assert!(body.get(field).is_some(), "missing {}", field);
    }
}

#[tokio::test]
async fn analyze_rejects_blank_title() {
    let (status, body) =
        post_json(app(state(Behaviour::Live)).await, "/analyze", json!({"title": " "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title must not be empty");
}

#[tokio::test]
async fn unreachable_source_falls_back_to_sample() {
    let (status, body) = post_json(
        app(state(Behaviour::Unreachable)).await,
        "/api/report",
        json!({"title": "Nairobi"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["title"], "Costantino Castriota");
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn unreachable_source_without_fallback_is_bad_gateway() {
    let (status, _) = post_json(
        app(state(Behaviour::Unreachable).without_fallback()).await,
        "/analyze",
        json!({"title": "Nairobi"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn inconsistent_record_is_refused() {
    let (status, body) = post_json(
        app(state(Behaviour::Inconsistent)).await,
        "/analyze",
        json!({"title": "Nairobi"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["violations"], json!(["is_living and is_dead are both set"]));
}

#[tokio::test]
async fn missing_article_is_not_found() {
    let (status, _) = post_json(
        app(state(Behaviour::Missing)).await,
        "/api/report",
        json!({"title": "Hakuna"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sample_endpoints() {
    let (status, body) = get(app(state(Behaviour::Live)).await, "/api/sample/analysis").await;
    assert_eq!(status, StatusCode::OK);
    let analysis: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(analysis["total_links_internal"], 12);
    assert_eq!(analysis["death_year"], 1500);

    let (status, body) =
        get(app(state(Behaviour::Live)).await, "/api/sample/recommendations").await;
    assert_eq!(status, StatusCode::OK);
    let recommendations: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(recommendations.len(), 4);
}

#[tokio::test]
async fn index_mounts_the_sample_report() {
    let (status, page) = get(app(state(Behaviour::Live)).await, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<div id=\"app\"><main"));
    assert!(page.contains("Costantino Castriota"));
    assert!(page.contains("bootstrap.bundle.min.js"));
}

#[tokio::test]
async fn report_page_renders_live_report() {
    let (status, page) = get(app(state(Behaviour::Live)).await, "/report?title=Mombasa").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Mombasa"));

    let (status, _) = get(app(state(Behaviour::Live)).await, "/report?title=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn serves_stylesheet() {
    let resp = app(state(Behaviour::Live))
        .await
        .oneshot(Request::builder().uri("/static/style.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_TYPE],
        "text/css; charset=utf-8"
    );
}

//! Pulseboard HTTP Surface
//!
//! Serves the dashboard page and a small JSON API, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard with nothing selected
//! - `POST /` - Submit the selector form and render results
//!
//! ## JSON
//! - `GET /api/v1/categories` - Selectable content types
//! - `POST /api/v1/insights` - Render plan for `{"categories": [...]}`
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use pulseboard::api::{serve, AppState};
//! use pulseboard::config::{DashboardConfig, ServerConfig};
//! use pulseboard::source::FixtureAnalyticsSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Arc::new(FixtureAnalyticsSource::new("response.json"));
//!     let state = AppState::new(source, DashboardConfig::default());
//!     serve(state, &ServerConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/categories", get(routes::categories::list_categories))
        .route("/insights", post(routes::insights::generate_insights));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route(
            "/",
            get(routes::dashboard::show_dashboard).post(routes::dashboard::generate_insights),
        )
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Pulseboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Pulseboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Selection;
    use crate::config::DashboardConfig;
    use crate::response::AnalyticsResponse;
    use crate::source::{AnalyticsSource, SourceError};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tower::util::ServiceExt;

    /// Records every selection it is asked for
    struct RecordingSource {
        response: Option<Value>,
        calls: Mutex<Vec<Selection>>,
    }

    impl RecordingSource {
        fn ok(response: Value) -> Arc<Self> {
            Arc::new(Self {
                response: Some(response),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                response: None,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Selection> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AnalyticsSource for RecordingSource {
        fn name(&self) -> &str {
            "recording"
        }

        async fn get_data(&self, selection: &Selection) -> Result<AnalyticsResponse, SourceError> {
            self.calls.lock().unwrap().push(selection.clone());
            match &self.response {
                Some(value) => Ok(AnalyticsResponse::from_value(value.clone())?),
                None => Err(SourceError::Unavailable),
            }
        }

        async fn health_check(&self) -> Result<(), SourceError> {
            match self.response {
                Some(_) => Ok(()),
                None => Err(SourceError::Unavailable),
            }
        }
    }

    fn app(source: Arc<RecordingSource>) -> Router {
        build_router(AppState::new(source, DashboardConfig::default()))
    }

    fn form_post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn sample_response() -> Value {
        json!({
            "metrics": {"image": {"engagement_rate": 12.345, "reach": 15000}},
            "insights": {"image": "Faces increase saves", "text": "Short posts win"},
            "comparative_analysis": {},
            "recommendations": {"video": ["Post more reels", "Use trending audio"]}
        })
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let source = RecordingSource::ok(sample_response());
        let response = app(source.clone()).oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Social Media Performance Dashboard"));
        assert!(html.contains("Generate Insights"));
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_generate_from_form() {
        let source = RecordingSource::ok(sample_response());
        let response = app(source.clone())
            .oneshot(form_post("image=on&video=on"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Engagement Rate"));
        assert!(html.contains("12.35"));
        assert!(html.contains("15,000.00"));
        assert!(html.contains("Faces increase saves"));
        assert!(!html.contains("Short posts win"));
        assert!(!html.contains("Comparative Analysis"));
        assert!(html.contains("Use trending audio"));
        assert!(html.contains(r#"name="image" value="on" checked"#));

        assert_eq!(
            source.calls(),
            vec![Selection::from_labels(["Image", "Video"]).unwrap()]
        );
    }

    #[tokio::test]
    async fn test_empty_form_blocks_without_fetch() {
        let source = RecordingSource::ok(sample_response());
        let response = app(source.clone()).oneshot(form_post("")).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains("Please select at least one content type to analyze!"));
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_source_failure_shows_banner() {
        let source = RecordingSource::failing();
        let response = app(source.clone())
            .oneshot(form_post("text=on"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = body_text(response).await;
        assert!(html.contains("Unable to generate insights right now"));
        assert!(!html.contains("<section"));
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_every_subset_reaches_source_exactly() {
        let keys = ["text", "image", "video", "reels", "carousel"];
        for mask in 1u8..32 {
            let chosen: Vec<&str> = keys
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, k)| *k)
                .collect();
            let body = chosen
                .iter()
                .map(|k| format!("{}=on", k))
                .collect::<Vec<_>>()
                .join("&");

            let source = RecordingSource::ok(json!({}));
            let response = app(source.clone()).oneshot(form_post(&body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(source.calls(), vec![Selection::from_labels(&chosen).unwrap()]);
        }
    }

    #[tokio::test]
    async fn test_json_insights() {
        let source = RecordingSource::ok(sample_response());
        let response = app(source)
            .oneshot(json_post("/api/v1/insights", json!({"categories": ["video"]})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let plan: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(plan["selection"], json!(["Video"]));

        let kinds: Vec<_> = plan["sections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["kind"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(kinds, vec!["metrics", "insights", "recommendations"]);

        let recommendations = &plan["sections"][2]["groups"][0];
        assert_eq!(recommendations["title"], "Video Recommendations");
        assert_eq!(recommendations["items"][0]["value"], "Post more reels");
        assert_eq!(recommendations["items"][0]["tone"], "success");
    }

    #[tokio::test]
    async fn test_json_insights_empty_selection() {
        let source = RecordingSource::ok(sample_response());
        let response = app(source.clone())
            .oneshot(json_post("/api/v1/insights", json!({"categories": []})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"]["code"], "EMPTY_SELECTION");
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_json_insights_unknown_category() {
        let source = RecordingSource::ok(sample_response());
        let response = app(source.clone())
            .oneshot(json_post("/api/v1/insights", json!({"categories": ["Stories"]})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_json_insights_source_failure() {
        let response = app(RecordingSource::failing())
            .oneshot(json_post("/api/v1/insights", json!({"categories": ["Text"]})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"]["code"], "SOURCE_ERROR");
    }

    #[tokio::test]
    async fn test_categories() {
        let response = app(RecordingSource::ok(json!({})))
            .oneshot(get("/api/v1/categories"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        let labels: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["label"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(labels, vec!["Text", "Image", "Video", "Reels", "Carousel"]);
        assert_eq!(body[4]["icon"], "🎠");
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let healthy = app(RecordingSource::ok(json!({})));
        let response = healthy.clone().oneshot(get("/health/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let response = healthy.clone().oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = healthy.oneshot(get("/health")).await.unwrap();
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["source"], "recording");
    }

    #[tokio::test]
    async fn test_readiness_fails_when_source_down() {
        let response = app(RecordingSource::failing())
            .oneshot(get("/health/ready"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}

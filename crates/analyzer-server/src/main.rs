//! crypto-analyzer HTTP Server
//!
//! Axum-based server exposing market snapshots, trend reports and
//! investment recommendations over a simulated multi-source feed.

mod config;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crypto_analyzer::{AnalyzerConfig, MarketAnalyzer, MarketFeed, SimulatedFeed};

use crate::config::ServerConfig;
use crate::handlers::{analyze_trends, health_check, market_snapshot, recommend};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env();

    let analyzer = match &config.analyzer_config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading analyzer config");
            MarketAnalyzer::with_config(AnalyzerConfig::from_json_file(path)?)?
        }
        None => MarketAnalyzer::new(),
    };

    let feed: Arc<dyn MarketFeed> = Arc::new(SimulatedFeed::new());
    tracing::info!(feed = feed.name(), sources = ?feed.sources(), "market feed ready");

    let state = AppState {
        analyzer: Arc::new(analyzer),
        feed,
        default_sources: Arc::new(config.default_sources.clone()),
    };

    let app = router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("crypto-analyzer server running on http://{}", config.bind_addr);
    tracing::info!("  GET  /health               - Health check");
    tracing::info!("  GET  /api/market           - Raw market snapshot");
    tracing::info!("  POST /api/trends           - Market trend report");
    tracing::info!("  POST /api/recommendations  - Investment recommendations");

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/market", get(market_snapshot))
        .route("/api/trends", post(analyze_trends))
        .route("/api/recommendations", post(recommend))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_app() -> Router {
        router(AppState {
            analyzer: Arc::new(MarketAnalyzer::new()),
            feed: Arc::new(SimulatedFeed::new()),
            default_sources: Arc::new(Vec::new()),
        })
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = test_app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["sources"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_market_snapshot_filters_sources() {
        let request = Request::builder()
            .uri("/api/market?sources=CoinMarketCap,Kraken%20Blog")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["records"].as_array().unwrap().len(), 9);
        assert!(body["run_id"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_source_is_bad_request() {
        let request = Request::builder()
            .uri("/api/market?sources=Nowhere")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "FEED_ERROR");
    }

    #[tokio::test]
    async fn test_trends_from_feed() {
        let (status, body) = send(post_json("/api/trends", &json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["asset_count"], 22);
        assert_eq!(body["top_gainers"][0]["name"], "Chainlink");
    }

    #[tokio::test]
    async fn test_trends_with_empty_records() {
        let (status, body) = send(post_json("/api/trends", &json!({ "records": [] }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "No data available for analysis");
    }

    #[tokio::test]
    async fn test_trends_without_body_uses_feed() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/trends")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["asset_count"], 22);
    }

    #[tokio::test]
    async fn test_trends_with_malformed_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/trends")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"records\": ["))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn test_recommendations_from_feed() {
        let payload = json!({
            "investment_amount": 1000,
            "risk_tolerance": "Medium",
            "investment_horizon": "Medium-term (3-12 months)",
        });
        let (status, body) = send(post_json("/api/recommendations", &payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");

        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 3);
        let total: f64 = recs
            .iter()
            .map(|r| r["allocation_percentage"].as_f64().unwrap())
            .sum();
        assert!((total - 100.0).abs() <= 0.5);
        assert!(body["generated_at"].is_string());
    }

    #[tokio::test]
    async fn test_recommendations_with_explicit_records() {
        let payload = json!({
            "investment_amount": 1000,
            "risk_tolerance": "Medium",
            "investment_horizon": "Medium-term (3-12 months)",
            "records": [
                {"name": "Bitcoin", "symbol": "BTC", "market_cap": 1e12, "change_24h": 2.0,
                 "volume_24h": 4e10, "source": "CoinGecko"},
                {"name": "Ethereum", "symbol": "ETH", "market_cap": 5e11, "change_24h": -1.0,
                 "volume_24h": 2e10, "source": "CoinGecko"}
            ]
        });
        let (status, body) = send(post_json("/api/recommendations", &payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommendations"][0]["coin"], "Ethereum (ETH)");
        assert_eq!(body["recommendations"][0]["allocation_percentage"], 59.83);
    }

    #[tokio::test]
    async fn test_recommendations_reject_non_positive_amount() {
        let payload = json!({
            "investment_amount": 0,
            "risk_tolerance": "Low",
            "investment_horizon": "Long-term (1+ years)",
        });
        let (status, body) = send(post_json("/api/recommendations", &payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_AMOUNT");
    }
}

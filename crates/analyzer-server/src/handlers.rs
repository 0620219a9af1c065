//! HTTP Handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crypto_analyzer::{
    AnalyzerError, InvestmentHorizon, InvestorProfile, MarketRecord, Outcome, RiskTolerance,
    split_sentiment,
};

use crate::config::parse_sources;
use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub feed: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Every analysis response: run metadata plus the flattened body
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Envelope<T> {
    fn new(run_id: Uuid, body: T) -> Self {
        Self {
            run_id,
            generated_at: Utc::now(),
            body,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MarketQuery {
    /// Comma-separated source names
    #[serde(default)]
    pub sources: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MarketSnapshot {
    pub records: Vec<MarketRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendsRequest {
    /// Explicit records; when absent the feed is queried
    #[serde(default)]
    pub records: Option<Vec<MarketRecord>>,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub investment_amount: Decimal,
    pub risk_tolerance: RiskTolerance,
    pub investment_horizon: InvestmentHorizon,
    #[serde(default)]
    pub records: Option<Vec<MarketRecord>>,
    /// Explicit sentiment feed; extracted from `records` when absent
    #[serde(default)]
    pub sentiment: Option<Vec<MarketRecord>>,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        feed: state.feed.name().to_string(),
        sources: state.feed.sources(),
    })
}

/// Raw snapshot from the configured feed
pub async fn market_snapshot(
    State(state): State<AppState>,
    Query(query): Query<MarketQuery>,
) -> Result<Json<Envelope<MarketSnapshot>>, ApiError> {
    let run_id = Uuid::new_v4();
    let requested = query.sources.as_deref().map(parse_sources);
    let sources = state.sources_or_default(requested);

    let records = state
        .feed
        .fetch(&sources)
        .instrument(tracing::info_span!("market", %run_id))
        .await
        .map_err(feed_error)?;

    Ok(Json(Envelope::new(run_id, MarketSnapshot { records })))
}

/// Trend statistics over explicit records or a fresh snapshot.
/// An empty body queries the feed with the default sources.
pub async fn analyze_trends(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Envelope<Outcome<crypto_analyzer::TrendSummary>>>), ApiError> {
    let payload = parse_trends_request(&body)?;
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("trends", %run_id);

    let records = load_records(&state, payload.records, payload.sources)
        .instrument(span.clone())
        .await?;

    let outcome = span.in_scope(|| state.analyzer.analyze_market_trends(&records));
    Ok(outcome_response(run_id, outcome))
}

/// Ranked allocation for an investor profile
pub async fn recommend(
    State(state): State<AppState>,
    Json(payload): Json<RecommendRequest>,
) -> Result<(StatusCode, Json<Envelope<Outcome<crypto_analyzer::Recommendations>>>), ApiError> {
    if payload.investment_amount <= Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!(
                    "investment_amount must be positive, got {}",
                    payload.investment_amount
                ),
                code: "INVALID_AMOUNT".into(),
            }),
        ));
    }

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("recommend", %run_id);

    let records = load_records(&state, payload.records, payload.sources)
        .instrument(span.clone())
        .await?;
    let sentiment = payload
        .sentiment
        .unwrap_or_else(|| split_sentiment(&records));

    let profile = InvestorProfile::new(
        payload.investment_amount,
        payload.risk_tolerance,
        payload.investment_horizon,
    );

    let outcome = span.in_scope(|| {
        state
            .analyzer
            .recommend_investments(&records, &profile, Some(sentiment.as_slice()))
    });
    Ok(outcome_response(run_id, outcome))
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_trends_request(body: &[u8]) -> Result<TrendsRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TrendsRequest::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("invalid request body: {err}"),
                code: "INVALID_BODY".into(),
            }),
        )
    })
}

async fn load_records(
    state: &AppState,
    records: Option<Vec<MarketRecord>>,
    sources: Option<Vec<String>>,
) -> Result<Vec<MarketRecord>, ApiError> {
    if let Some(records) = records {
        return Ok(records);
    }
    let sources = state.sources_or_default(sources);
    state.feed.fetch(&sources).await.map_err(feed_error)
}

fn outcome_response<T>(run_id: Uuid, outcome: Outcome<T>) -> (StatusCode, Json<Envelope<Outcome<T>>>) {
    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(Envelope::new(run_id, outcome)))
}

fn feed_error(err: AnalyzerError) -> ApiError {
    tracing::warn!(error = %err, "feed fetch failed");
    let status = match err {
        AnalyzerError::Feed(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.user_message(),
            code: "FEED_ERROR".into(),
        }),
    )
}

//! Domain Models
//!
//! Market observations flowing into the engine and the recommendation
//! payload flowing out. Market metrics are `f64`; money (budget, allocation
//! percentages and amounts) uses `rust_decimal`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::profile::RiskLevel;

/// One observation of one asset from one source
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    /// Full name (e.g., "Bitcoin"); the aggregation key
    pub name: String,

    /// Ticker symbol (e.g., "BTC")
    #[serde(default)]
    pub symbol: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub market_cap: Option<f64>,

    #[serde(default)]
    pub volume_24h: Option<f64>,

    /// Signed 24-hour price change, in percent
    #[serde(default)]
    pub change_24h: Option<f64>,

    /// Sentiment in [0, 1]
    #[serde(default)]
    pub sentiment: Option<f64>,

    /// Free-form trend tag ("bullish", "neutral", ...)
    #[serde(default)]
    pub trend: Option<String>,

    /// Where this observation came from
    pub source: String,
}

impl MarketRecord {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: Some(symbol.into().to_uppercase()),
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    pub fn with_volume(mut self, volume_24h: f64) -> Self {
        self.volume_24h = Some(volume_24h);
        self
    }

    pub fn with_change(mut self, change_24h: f64) -> Self {
        self.change_24h = Some(change_24h);
        self
    }

    pub fn with_sentiment(mut self, sentiment: f64, trend: impl Into<String>) -> Self {
        self.sentiment = Some(sentiment);
        self.trend = Some(trend.into());
        self
    }

    /// Whether this record carries sentiment or trend data
    pub fn has_sentiment(&self) -> bool {
        self.sentiment.is_some() || self.trend.is_some()
    }
}

/// Records of a mixed feed that carry sentiment or trend tags
pub fn split_sentiment(records: &[MarketRecord]) -> Vec<MarketRecord> {
    records.iter().filter(|r| r.has_sentiment()).cloned().collect()
}

/// One row per unique asset name, numeric fields averaged across sources
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregatedAsset {
    pub name: String,
    pub symbol: Option<String>,
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub change_24h: Option<f64>,

    /// Distinct contributing sources, first-seen order
    pub sources: Vec<String>,
}

impl AggregatedAsset {
    /// Display form used in recommendations: "Bitcoin (BTC)"
    pub fn display_name(&self) -> String {
        match self.symbol.as_deref() {
            Some(symbol) if !symbol.is_empty() => format!("{} ({})", self.name, symbol),
            _ => self.name.clone(),
        }
    }
}

/// An aggregated asset with its composite score
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredAsset {
    #[serde(flatten)]
    pub asset: AggregatedAsset,

    /// Composite score, never negative
    pub score: f64,

    pub market_cap_score: Option<f64>,
    pub change_score: Option<f64>,
    pub volume_score: Option<f64>,

    /// Additive terms applied on top of the base score (e.g. sentiment)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<ScoreAdjustment>,
}

/// Contribution of one pluggable scoring term
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreAdjustment {
    pub term: String,
    pub value: f64,
}

impl ScoredAsset {
    pub fn unscored(asset: AggregatedAsset) -> Self {
        Self {
            asset,
            score: 0.0,
            market_cap_score: None,
            change_score: None,
            volume_score: None,
            adjustments: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.asset.name
    }
}

/// Proportional share of the budget for one scored asset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub scored: ScoredAsset,

    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// One recommended asset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// "Name (SYMBOL)"
    pub coin: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub allocation_percentage: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub allocation_amount: Decimal,

    pub rationale: String,
    pub holding_period: String,
    pub risk_level: RiskLevel,
    pub potential_return: String,
}

/// Successful payload of `recommend_investments`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// At most three, highest score first
    pub recommendations: Vec<Recommendation>,
    pub market_outlook: String,
    pub risk_assessment: String,
    pub additional_advice: String,
}

impl Recommendations {
    pub fn total_percentage(&self) -> Decimal {
        self.recommendations.iter().map(|r| r.allocation_percentage).sum()
    }

    pub fn total_amount(&self) -> Decimal {
        self.recommendations.iter().map(|r| r.allocation_amount).sum()
    }
}

/// An asset in the top gainers / losers lists
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopMover {
    pub name: String,
    pub symbol: Option<String>,
    pub change_24h: f64,
}

/// Successful payload of `analyze_market_trends`
///
/// Statistics are `None` when no record carries a 24h change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub asset_count: usize,
    pub avg_change_24h: Option<f64>,
    pub median_change_24h: Option<f64>,
    pub positive_performers: Option<usize>,
    pub negative_performers: Option<usize>,
    pub neutral_performers: Option<usize>,
    pub positive_ratio: Option<f64>,
    pub market_sentiment: String,
    pub top_gainers: Vec<TopMover>,
    pub top_losers: Vec<TopMover>,
}

/// Tagged result returned by every public analysis operation.
///
/// Serializes as `{"status": "success", ...payload}` or
/// `{"status": "error", "message": "..."}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome<T> {
    Success(T),
    Error { message: String },
}

impl<T> Outcome<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Error { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error { message } => Some(message),
        }
    }
}

impl<T> From<Result<T>> for Outcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) => {
                tracing::error!(error = %err, "analysis failed");
                Self::error(err.user_message())
            }
        }
    }
}

pub type AnalysisResult = Outcome<Recommendations>;
pub type TrendAnalysis = Outcome<TrendSummary>;

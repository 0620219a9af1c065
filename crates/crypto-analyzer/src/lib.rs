//! # crypto-analyzer
//!
//! Deterministic scoring, ranking and allocation engine for multi-source
//! cryptocurrency market snapshots.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌───────────┐   ┌────────┐   ┌──────────┐   ┌───────────┐   ┌───────────┐
//! │ MarketRecord │──▶│ aggregate │──▶│ score  │──▶│ top 10   │──▶│ allocate  │──▶│ top 3 +   │
//! │ (per source) │   │ (by name) │   │ (+sent)│   │ shortlist│   │ (by score)│   │ narrative │
//! └──────────────┘   └───────────┘   └────────┘   └──────────┘   └───────────┘   └───────────┘
//! ```
//!
//! The trend report runs separately over the raw records.
//!
//! ## Example: $1000, Medium risk, Medium-term
//!
//! ```text
//! Ethereum (ETH)  ██████████████████████████████  59.83%  $598.30   Low
//! Bitcoin  (BTC)  ████████████████████            40.17%  $401.70   Low
//! ```
//!
//! Every operation returns an [`Outcome`]: `status: "success"` with the
//! payload, or `status: "error"` with a message. Nothing panics on bad data.
//!
//! The scoring weights, bias multipliers and rule tables are heuristics.
//! They are not calibrated against realized returns, and the output is not
//! financial advice.

pub mod analyzer;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod feed;
pub mod model;
pub mod narrative;
pub mod profile;
pub mod trends;

pub use analyzer::MarketAnalyzer;
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, Result};
pub use feed::{MarketFeed, SimulatedFeed};
pub use model::{
    AnalysisResult, MarketRecord, Outcome, Recommendation, Recommendations, TrendAnalysis,
    TrendSummary, split_sentiment,
};
pub use profile::{InvestmentHorizon, InvestorProfile, RiskLevel, RiskTolerance};

//! Analyzer Configuration
//!
//! Heuristic weights and sizes used by the engine. The defaults reproduce
//! the stock rule set; none of the constants are calibrated against
//! realized returns.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::AssetClassifier;
use crate::error::{AnalyzerError, Result};
use crate::profile::{InvestmentHorizon, RiskTolerance};

pub const DEFAULT_ADDITIONAL_ADVICE: &str = "Remember to practice proper risk management by not investing more than you can afford to lose. \
Consider dollar-cost averaging instead of lump-sum investing to reduce timing risk. \
Regularly review your portfolio and adjust allocations as market conditions change.";

/// Top-level engine configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Assets kept after scoring, before allocation
    pub shortlist_size: usize,

    /// Assets presented in the final recommendation list
    pub final_size: usize,

    /// Re-run the allocator over the capped list so it sums to 100%
    pub rebalance_after_cap: bool,

    pub scoring: ScoringWeights,

    pub sentiment: SentimentWeights,

    pub classification: AssetClassifier,

    /// Closing advice attached to every successful recommendation
    pub additional_advice: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            shortlist_size: 10,
            final_size: 3,
            rebalance_after_cap: true,
            scoring: ScoringWeights::default(),
            sentiment: SentimentWeights::default(),
            classification: AssetClassifier::default(),
            additional_advice: DEFAULT_ADDITIONAL_ADVICE.into(),
        }
    }
}

impl AnalyzerConfig {
    /// Load from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.shortlist_size == 0 || self.final_size == 0 {
            return Err(AnalyzerError::Config(
                "shortlist_size and final_size must be at least 1".into(),
            ));
        }
        if self.final_size > self.shortlist_size {
            return Err(AnalyzerError::Config(format!(
                "final_size ({}) exceeds shortlist_size ({})",
                self.final_size, self.shortlist_size
            )));
        }

        let percentile = self.scoring.volume_percentile;
        if !(percentile > 0.0 && percentile <= 1.0) {
            return Err(AnalyzerError::Config(format!(
                "volume_percentile must be in (0, 1], got {percentile}"
            )));
        }

        let weights = self
            .scoring
            .market_cap
            .values()
            .into_iter()
            .chain(self.scoring.change.values())
            .chain([self.scoring.volume_weight, self.sentiment.weight]);
        for weight in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AnalyzerError::Config(format!(
                    "weights must be finite and non-negative, got {weight}"
                )));
            }
        }

        for rule in &self.scoring.bias {
            let ok = [rule.favoured_multiplier, rule.otherwise_multiplier]
                .iter()
                .all(|m| m.is_finite() && *m >= 0.0);
            if !ok {
                return Err(AnalyzerError::Config(format!(
                    "bias multipliers for {} must be finite and non-negative",
                    rule.asset
                )));
            }
        }

        let overlap = self.classification.overlap();
        if !overlap.is_empty() {
            return Err(AnalyzerError::Config(format!(
                "assets classified as both reference and high-volatility: {}",
                overlap.join(", ")
            )));
        }

        Ok(())
    }
}

/// Weights for the three score terms and the reference-asset bias
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Market-cap term weight, by risk tolerance
    pub market_cap: ToleranceWeights,

    /// 24h-change term weight, by investment horizon
    pub change: HorizonWeights,

    pub volume_weight: f64,

    /// Percentile of the volume/market-cap ratio used as the normalizer
    pub volume_percentile: f64,

    pub bias: Vec<BiasRule>,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            market_cap: ToleranceWeights::default(),
            change: HorizonWeights::default(),
            volume_weight: 0.5,
            volume_percentile: 0.95,
            bias: vec![
                BiasRule {
                    asset: "Bitcoin".into(),
                    favoured: vec![RiskTolerance::VeryLow, RiskTolerance::Low],
                    favoured_multiplier: 1.5,
                    otherwise_multiplier: 0.8,
                },
                BiasRule {
                    asset: "Ethereum".into(),
                    favoured: vec![RiskTolerance::Low, RiskTolerance::Medium],
                    favoured_multiplier: 1.3,
                    otherwise_multiplier: 0.9,
                },
            ],
        }
    }
}

impl ScoringWeights {
    /// Bias multiplier for an asset; 1.0 when no rule names it
    pub fn bias_for(&self, asset: &str, tolerance: RiskTolerance) -> f64 {
        self.bias
            .iter()
            .find(|rule| rule.asset == asset)
            .map_or(1.0, |rule| rule.multiplier(tolerance))
    }
}

/// One row of the tolerance-keyed weight table
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceWeights {
    pub very_low: f64,
    pub low: f64,
    pub medium: f64,
    pub high: f64,
    pub very_high: f64,
    /// Used for unrecognized tolerances
    pub fallback: f64,
}

impl Default for ToleranceWeights {
    fn default() -> Self {
        Self {
            very_low: 3.0,
            low: 2.0,
            medium: 1.0,
            high: 0.5,
            very_high: 0.2,
            fallback: 1.0,
        }
    }
}

impl ToleranceWeights {
    pub fn get(&self, tolerance: RiskTolerance) -> f64 {
        match tolerance {
            RiskTolerance::VeryLow => self.very_low,
            RiskTolerance::Low => self.low,
            RiskTolerance::Medium => self.medium,
            RiskTolerance::High => self.high,
            RiskTolerance::VeryHigh => self.very_high,
            RiskTolerance::Unrecognized => self.fallback,
        }
    }

    fn values(&self) -> [f64; 6] {
        [self.very_low, self.low, self.medium, self.high, self.very_high, self.fallback]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonWeights {
    pub short_term: f64,
    pub medium_term: f64,
    pub long_term: f64,
    pub fallback: f64,
}

impl Default for HorizonWeights {
    fn default() -> Self {
        Self {
            short_term: 2.0,
            medium_term: 1.0,
            long_term: 0.5,
            fallback: 1.0,
        }
    }
}

impl HorizonWeights {
    pub fn get(&self, horizon: InvestmentHorizon) -> f64 {
        match horizon {
            InvestmentHorizon::ShortTerm => self.short_term,
            InvestmentHorizon::MediumTerm => self.medium_term,
            InvestmentHorizon::LongTerm => self.long_term,
            InvestmentHorizon::Unrecognized => self.fallback,
        }
    }

    fn values(&self) -> [f64; 4] {
        [self.short_term, self.medium_term, self.long_term, self.fallback]
    }
}

/// Score multiplier for a named asset, switched on the user's tolerance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiasRule {
    pub asset: String,
    /// Tolerances that receive `favoured_multiplier`
    pub favoured: Vec<RiskTolerance>,
    pub favoured_multiplier: f64,
    pub otherwise_multiplier: f64,
}

impl BiasRule {
    pub fn multiplier(&self, tolerance: RiskTolerance) -> f64 {
        if self.favoured.contains(&tolerance) {
            self.favoured_multiplier
        } else {
            self.otherwise_multiplier
        }
    }
}

/// Weights of the optional sentiment term
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentWeights {
    /// Multiplier applied to the mean sentiment (0..1)
    pub weight: f64,

    /// Additive bonus per trend tag, matched case-insensitively
    pub trend_bonus: Vec<(String, f64)>,
}

impl Default for SentimentWeights {
    fn default() -> Self {
        Self {
            weight: 0.5,
            trend_bonus: vec![
                ("very bullish".into(), 0.25),
                ("bullish".into(), 0.15),
                ("neutral".into(), 0.0),
                ("bearish".into(), -0.15),
                ("very bearish".into(), -0.25),
            ],
        }
    }
}

impl SentimentWeights {
    /// Bonus for a trend tag; unknown tags contribute nothing
    pub fn bonus_for(&self, trend: &str) -> f64 {
        let trend = trend.trim();
        self.trend_bonus
            .iter()
            .find(|(tag, _)| tag.eq_ignore_ascii_case(trend))
            .map_or(0.0, |(_, bonus)| *bonus)
    }
}

//! Pluggable additive scoring terms.
//!
//! The base score is always computed first and without regard to any term;
//! terms are then added per asset, and only for assets they have data for.
//! The sentiment blender is the one term shipped with the engine.

use std::collections::HashMap;

use tracing::debug;

use crate::config::SentimentWeights;
use crate::model::{AggregatedAsset, MarketRecord, ScoreAdjustment, ScoredAsset};

/// An additive contribution on top of the base score
pub trait ScoringTerm: Send + Sync {
    /// Identifier recorded in `ScoredAsset::adjustments`
    fn name(&self) -> &str;

    /// Contribution for an asset, or `None` when the term has no data for it
    fn contribution(&self, asset: &AggregatedAsset) -> Option<f64>;
}

/// Add each term's contribution to the scores, flooring at zero
pub fn apply_terms(scored: &mut [ScoredAsset], terms: &[&dyn ScoringTerm]) {
    for term in terms {
        let mut touched = 0usize;
        for asset in scored.iter_mut() {
            if let Some(value) = term.contribution(&asset.asset) {
                asset.score = (asset.score + value).max(0.0);
                asset.adjustments.push(ScoreAdjustment {
                    term: term.name().to_string(),
                    value,
                });
                touched += 1;
            }
        }
        debug!(term = term.name(), assets = touched, "applied scoring term");
    }
}

#[derive(Default)]
struct SentimentStats {
    sentiment_sum: f64,
    sentiment_count: u32,
    trend_sum: f64,
    trend_count: u32,
}

/// Blends a sentiment/trend feed, keyed by asset name, into the score.
///
/// Contribution = mean sentiment × weight + mean trend bonus.
pub struct SentimentBlender {
    by_name: HashMap<String, SentimentStats>,
    weight: f64,
}

impl SentimentBlender {
    pub fn new(feed: &[MarketRecord], weights: &SentimentWeights) -> Self {
        let mut by_name: HashMap<String, SentimentStats> = HashMap::new();

        for record in feed {
            let name = record.name.trim();
            if name.is_empty() {
                continue;
            }
            let stats = by_name.entry(name.to_string()).or_default();

            if let Some(sentiment) = record.sentiment.filter(|s| (0.0..=1.0).contains(s)) {
                stats.sentiment_sum += sentiment;
                stats.sentiment_count += 1;
            } else if let Some(sentiment) = record.sentiment {
                tracing::warn!(asset = name, sentiment, "sentiment outside [0, 1], ignoring");
            }

            if let Some(trend) = record.trend.as_deref() {
                stats.trend_sum += weights.bonus_for(trend);
                stats.trend_count += 1;
            }
        }

        Self {
            by_name,
            weight: weights.weight,
        }
    }

    /// Whether the feed carried anything usable
    pub fn is_empty(&self) -> bool {
        self.by_name
            .values()
            .all(|s| s.sentiment_count == 0 && s.trend_count == 0)
    }
}

impl ScoringTerm for SentimentBlender {
    fn name(&self) -> &str {
        "sentiment"
    }

    fn contribution(&self, asset: &AggregatedAsset) -> Option<f64> {
        let stats = self.by_name.get(&asset.name)?;
        if stats.sentiment_count == 0 && stats.trend_count == 0 {
            return None;
        }

        let mut value = 0.0;
        if stats.sentiment_count > 0 {
            value += stats.sentiment_sum / f64::from(stats.sentiment_count) * self.weight;
        }
        if stats.trend_count > 0 {
            value += stats.trend_sum / f64::from(stats.trend_count);
        }
        Some(value)
    }
}

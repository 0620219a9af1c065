//! Scorer
//!
//! Composite heuristic score per asset:
//!
//! ```text
//! score = ( mc_score     × w_tolerance      if market cap present
//!         + change_score × w_horizon        if 24h change present
//!         + volume_score × w_volume         if volume and market cap present )
//!         × bias(asset, tolerance)
//! ```
//!
//! A missing metric only drops its own term.

use tracing::debug;

use crate::config::ScoringWeights;
use crate::error::{AnalyzerError, Result};
use crate::model::{AggregatedAsset, ScoredAsset};
use crate::profile::{InvestmentHorizon, RiskTolerance};

/// Maps a 24h change of -10%..+10% onto 0..1, saturating outside
pub fn change_score(change_24h: f64) -> f64 {
    ((change_24h + 10.0) / 20.0).clamp(0.0, 1.0)
}

/// Linear-interpolated percentile (`q` in [0, 1]) of unsorted values
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    #[allow(clippy::cast_precision_loss)]
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (lo, hi) = (pos.floor() as usize, pos.ceil() as usize);
    #[allow(clippy::cast_precision_loss)]
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

fn volume_ratio(asset: &AggregatedAsset) -> Option<f64> {
    match (asset.volume_24h, asset.market_cap) {
        (Some(volume), Some(cap)) if cap > 0.0 => Some(volume / cap),
        _ => None,
    }
}

/// Weighted multi-factor scorer
pub struct Scorer<'a> {
    weights: &'a ScoringWeights,
}

impl<'a> Scorer<'a> {
    pub fn new(weights: &'a ScoringWeights) -> Self {
        Self { weights }
    }

    /// Score every asset. Output order matches input order.
    pub fn score(
        &self,
        assets: &[AggregatedAsset],
        tolerance: RiskTolerance,
        horizon: InvestmentHorizon,
    ) -> Result<Vec<ScoredAsset>> {
        if assets.is_empty() {
            return Err(AnalyzerError::EmptyInput("scoring".into()));
        }

        let cap_weight = self.weights.market_cap.get(tolerance);
        let change_weight = self.weights.change.get(horizon);

        let cap_denominator = assets
            .iter()
            .filter_map(|a| a.market_cap)
            .reduce(f64::max)
            .map(f64::ln_1p);

        let ratios: Vec<f64> = assets.iter().filter_map(volume_ratio).collect();
        let max_ratio = percentile(&ratios, self.weights.volume_percentile).unwrap_or(0.0);

        debug!(
            assets = assets.len(),
            %tolerance,
            %horizon,
            max_ratio,
            "scoring assets"
        );

        let scored = assets
            .iter()
            .map(|asset| {
                let mut scored = ScoredAsset::unscored(asset.clone());
                let mut total = 0.0;

                if let (Some(cap), Some(denominator)) = (asset.market_cap, cap_denominator) {
                    let s = if denominator > 0.0 {
                        (cap.ln_1p() / denominator).clamp(0.0, 1.0)
                    } else {
                        0.0
                    };
                    scored.market_cap_score = Some(s);
                    total += s * cap_weight;
                }

                if let Some(change) = asset.change_24h {
                    let s = change_score(change);
                    scored.change_score = Some(s);
                    total += s * change_weight;
                }

                if let Some(ratio) = volume_ratio(asset) {
                    let s = if max_ratio > 0.0 {
                        (ratio / max_ratio).clamp(0.0, 1.0)
                    } else {
                        0.0
                    };
                    scored.volume_score = Some(s);
                    total += s * self.weights.volume_weight;
                }

                scored.score = total * self.weights.bias_for(&asset.name, tolerance);
                scored
            })
            .collect();

        Ok(scored)
    }
}

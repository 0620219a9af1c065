//! Narrative Generator
//!
//! Turns allocations into presentable recommendations using fixed rule
//! tables only. Output strings are a pure function of the inputs.

pub mod rules;

use crate::classify::AssetClassifier;
use crate::model::{Allocation, Recommendation};
use crate::profile::{InvestorProfile, RiskLevel, RiskTolerance};

/// Rationale prose for one asset. Zero values are treated like absent ones.
pub fn rationale(name: &str, score: f64, market_cap: Option<f64>, change_24h: Option<f64>) -> String {
    let mut parts = vec![format!(
        "{name} was selected due to its strong performance indicators."
    )];

    if let Some(cap) = market_cap.filter(|c| *c != 0.0) {
        let clause = if cap > 1e11 {
            "It has a very large market capitalization, indicating stability and broad adoption."
        } else if cap > 1e10 {
            "It has a solid market cap, making it relatively stable in the market."
        } else {
            "It is a mid-cap coin, which may offer growth potential but with more volatility."
        };
        parts.push(clause.to_string());
    }

    if let Some(change) = change_24h.filter(|c| *c != 0.0) {
        let clause = if change > 5.0 {
            "The asset showed strong recent gains in the last 24 hours."
        } else if change < -5.0 {
            "The asset had a recent dip, which could present a buying opportunity."
        } else {
            "The asset had modest price movement recently, suggesting relative stability."
        };
        parts.push(clause.to_string());
    }

    if score > 2.0 {
        parts.push("Its overall analysis score suggests a favorable investment outlook.".into());
    }

    parts.join(" ")
}

pub struct NarrativeGenerator<'a> {
    classifier: &'a AssetClassifier,
}

impl<'a> NarrativeGenerator<'a> {
    pub fn new(classifier: &'a AssetClassifier) -> Self {
        Self { classifier }
    }

    pub fn risk_level(&self, name: &str, tolerance: RiskTolerance) -> RiskLevel {
        rules::risk_level(self.classifier.classify(name), tolerance)
    }

    pub fn describe(&self, allocation: &Allocation, profile: &InvestorProfile) -> Recommendation {
        let asset = &allocation.scored.asset;
        let risk_level = self.risk_level(&asset.name, profile.risk_tolerance);

        Recommendation {
            coin: asset.display_name(),
            allocation_percentage: allocation.percentage,
            allocation_amount: allocation.amount,
            rationale: rationale(
                &asset.name,
                allocation.scored.score,
                asset.market_cap,
                asset.change_24h,
            ),
            holding_period: rules::holding_period(
                profile.investment_horizon,
                profile.risk_tolerance,
                self.classifier.is_reference(&asset.name),
            )
            .to_string(),
            risk_level,
            potential_return: rules::potential_return(risk_level, profile.investment_horizon)
                .to_string(),
        }
    }
}

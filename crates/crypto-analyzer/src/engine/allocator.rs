//! Allocator
//!
//! Splits the budget across assets in proportion to their scores.
//!
//! Percentages and amounts are each rounded to two decimal places
//! (banker's rounding), so the totals can miss 100% / the budget by a few
//! hundredths. That slack is expected and is not redistributed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::{AnalyzerError, Result};
use crate::model::{Allocation, ScoredAsset};

pub fn allocate(assets: &[ScoredAsset], investment_amount: Decimal) -> Result<Vec<Allocation>> {
    if investment_amount <= Decimal::ZERO {
        return Err(AnalyzerError::InvalidParameter(format!(
            "investment_amount must be positive, got {investment_amount}"
        )));
    }
    if assets.is_empty() {
        return Err(AnalyzerError::Allocation("no assets to allocate across".into()));
    }

    let total_score: f64 = assets.iter().map(|a| a.score).sum();
    if !(total_score > 0.0 && total_score.is_finite()) {
        return Err(AnalyzerError::Allocation(format!(
            "total score is {total_score}, no proportional split exists"
        )));
    }

    let mut allocations = Vec::with_capacity(assets.len());
    for asset in assets {
        let share = asset.score / total_score * 100.0;
        let percentage = Decimal::from_f64_retain(share)
            .ok_or_else(|| AnalyzerError::Allocation(format!("unrepresentable share {share}")))?
            .round_dp(2);
        let amount = (percentage / dec!(100) * investment_amount).round_dp(2);

        allocations.push(Allocation {
            scored: asset.clone(),
            percentage,
            amount,
        });
    }

    debug!(
        assets = allocations.len(),
        total_score,
        %investment_amount,
        "allocated budget"
    );

    Ok(allocations)
}

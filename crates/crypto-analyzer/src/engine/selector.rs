//! Selector
//!
//! Top-K by score, highest first. The sort is stable, so equal scores keep
//! their aggregation order.

use crate::model::ScoredAsset;

pub fn select_top(scored: &[ScoredAsset], k: usize) -> Vec<ScoredAsset> {
    let mut ranked: Vec<&ScoredAsset> = scored.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.into_iter().take(k).cloned().collect()
}

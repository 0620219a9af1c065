//! Trend Reporter
//!
//! Whole-dataset 24h-change statistics, independent of the recommendation
//! path. Runs over raw records, so an asset quoted by three sources is
//! counted three times.

use crate::error::{AnalyzerError, Result};
use crate::model::{MarketRecord, TopMover};
use crate::narrative::rules;

const TOP_MOVERS: usize = 5;

pub fn summarize(records: &[MarketRecord]) -> Result<crate::model::TrendSummary> {
    if records.is_empty() {
        return Err(AnalyzerError::EmptyInput("analysis".into()));
    }

    let with_change: Vec<(&MarketRecord, f64)> = records
        .iter()
        .filter_map(|r| r.change_24h.filter(|c| c.is_finite()).map(|c| (r, c)))
        .collect();

    if with_change.is_empty() {
        tracing::debug!(records = records.len(), "no 24h change data, trend statistics skipped");
        return Ok(crate::model::TrendSummary {
            asset_count: records.len(),
            avg_change_24h: None,
            median_change_24h: None,
            positive_performers: None,
            negative_performers: None,
            neutral_performers: None,
            positive_ratio: None,
            market_sentiment: rules::market_sentiment(None).into(),
            top_gainers: Vec::new(),
            top_losers: Vec::new(),
        });
    }

    let changes: Vec<f64> = with_change.iter().map(|(_, c)| *c).collect();
    let avg = mean(&changes);
    let positive = changes.iter().filter(|c| **c > 0.0).count();
    let negative = changes.iter().filter(|c| **c < 0.0).count();
    let neutral = changes.iter().filter(|c| **c == 0.0).count();

    #[allow(clippy::cast_precision_loss)]
    let positive_ratio = positive as f64 / records.len() as f64;

    let mut gainers = with_change.clone();
    gainers.sort_by(|a, b| b.1.total_cmp(&a.1));
    let mut losers = with_change;
    losers.sort_by(|a, b| a.1.total_cmp(&b.1));

    Ok(crate::model::TrendSummary {
        asset_count: records.len(),
        avg_change_24h: Some(avg),
        median_change_24h: median(&changes),
        positive_performers: Some(positive),
        negative_performers: Some(negative),
        neutral_performers: Some(neutral),
        positive_ratio: Some(positive_ratio),
        market_sentiment: rules::market_sentiment(Some(avg)).into(),
        top_gainers: movers(&gainers),
        top_losers: movers(&losers),
    })
}

fn movers(ranked: &[(&MarketRecord, f64)]) -> Vec<TopMover> {
    ranked
        .iter()
        .take(TOP_MOVERS)
        .map(|(r, change)| TopMover {
            name: r.name.clone(),
            symbol: r.symbol.clone(),
            change_24h: *change,
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, change: Option<f64>) -> MarketRecord {
        let mut r = MarketRecord::new(name, &name[..3], "CoinGecko");
        r.change_24h = change;
        r
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(summarize(&[]), Err(AnalyzerError::EmptyInput(_))));
    }

    #[test]
    fn test_statistics() {
        let records = vec![
            record("Bitcoin", Some(2.0)),
            record("Ethereum", Some(-1.0)),
            record("Solana", Some(5.4)),
            record("Cardano", Some(0.0)),
            record("Arbitrum", None),
        ];
        let summary = summarize(&records).unwrap();

        assert_eq!(summary.asset_count, 5);
        assert!((summary.avg_change_24h.unwrap() - 1.6).abs() < 1e-12);
        assert!((summary.median_change_24h.unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(summary.positive_performers, Some(2));
        assert_eq!(summary.negative_performers, Some(1));
        assert_eq!(summary.neutral_performers, Some(1));
        // Ratio is over all records, including those without a change
        assert!((summary.positive_ratio.unwrap() - 0.4).abs() < 1e-12);
        assert_eq!(summary.market_sentiment, "mildly bullish");

        assert_eq!(summary.top_gainers[0].name, "Solana");
        assert_eq!(summary.top_losers[0].name, "Ethereum");
        assert_eq!(summary.top_gainers.len(), 4);
    }

    #[test]
    fn test_top_movers_capped_at_five() {
        let records: Vec<MarketRecord> = (0..8)
            .map(|i| record(&format!("Coin{i}"), Some(f64::from(i) - 4.0)))
            .collect();
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.top_gainers.len(), 5);
        assert_eq!(summary.top_losers.len(), 5);
        assert_eq!(summary.top_gainers[0].change_24h, 3.0);
        assert_eq!(summary.top_losers[0].change_24h, -4.0);
        assert_eq!(summary.market_sentiment, "mildly bearish");
    }

    #[test]
    fn test_no_change_data_is_neutral() {
        let records = vec![record("Bitcoin", None), record("Polygon", None)];
        let summary = summarize(&records).unwrap();
        assert_eq!(summary.avg_change_24h, None);
        assert_eq!(summary.positive_performers, None);
        assert_eq!(summary.market_sentiment, "neutral");
        assert!(summary.top_gainers.is_empty());
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }
}

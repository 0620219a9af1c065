//! Market Analyzer
//!
//! Public entry points. Both operations return an `Outcome` and never
//! fail outright; internal errors are logged and reported through the
//! `message` field.

use tracing::{debug, info};

use crate::config::AnalyzerConfig;
use crate::engine::{self, Scorer, ScoringTerm, SentimentBlender};
use crate::error::{AnalyzerError, Result};
use crate::model::{
    AggregatedAsset, AnalysisResult, MarketRecord, Recommendations, ScoredAsset, TrendAnalysis,
    TrendSummary,
};
use crate::narrative::{NarrativeGenerator, rules};
use crate::profile::InvestorProfile;
use crate::trends;

/// Stateless analysis facade; cheap to share across threads
#[derive(Clone, Debug, Default)]
pub struct MarketAnalyzer {
    config: AnalyzerConfig,
}

impl MarketAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build with a custom configuration, rejecting invalid ones
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Whole-dataset 24h-change statistics over raw records
    pub fn analyze_market_trends(&self, records: &[MarketRecord]) -> TrendAnalysis {
        self.try_analyze_market_trends(records).into()
    }

    /// Score, rank and allocate, then describe the top picks.
    ///
    /// `sentiment` enables the additive sentiment term; `None` or an empty
    /// feed leaves the base score untouched.
    pub fn recommend_investments(
        &self,
        records: &[MarketRecord],
        profile: &InvestorProfile,
        sentiment: Option<&[MarketRecord]>,
    ) -> AnalysisResult {
        self.try_recommend_investments(records, profile, sentiment).into()
    }

    fn try_analyze_market_trends(&self, records: &[MarketRecord]) -> Result<TrendSummary> {
        let summary = trends::summarize(records)?;
        info!(
            records = summary.asset_count,
            sentiment = %summary.market_sentiment,
            "market trends analyzed"
        );
        Ok(summary)
    }

    fn try_recommend_investments(
        &self,
        records: &[MarketRecord],
        profile: &InvestorProfile,
        sentiment: Option<&[MarketRecord]>,
    ) -> Result<Recommendations> {
        if records.is_empty() {
            return Err(AnalyzerError::EmptyInput("recommendations".into()));
        }

        let assets = engine::aggregate(records)?;
        let scored = self.score(&assets, profile, sentiment)?;

        let shortlist = engine::select_top(&scored, self.config.shortlist_size);
        let allocations = engine::allocate(&shortlist, profile.investment_amount)?;

        let positive: Vec<_> = allocations
            .into_iter()
            .filter(|a| a.scored.score > 0.0)
            .collect();
        let mut picks: Vec<_> = positive.iter().take(self.config.final_size).cloned().collect();

        if self.config.rebalance_after_cap && picks.len() < positive.len() {
            let capped: Vec<ScoredAsset> = picks.iter().map(|a| a.scored.clone()).collect();
            picks = engine::allocate(&capped, profile.investment_amount)?;
            debug!(kept = picks.len(), dropped = positive.len() - picks.len(), "rebalanced after cap");
        }

        let narrator = NarrativeGenerator::new(&self.config.classification);
        let recommendations: Vec<_> = picks.iter().map(|a| narrator.describe(a, profile)).collect();

        info!(
            assets = assets.len(),
            shortlisted = shortlist.len(),
            recommended = recommendations.len(),
            tolerance = %profile.risk_tolerance,
            horizon = %profile.investment_horizon,
            "recommendations generated"
        );

        Ok(Recommendations {
            recommendations,
            market_outlook: rules::market_outlook(average_change(&assets)).into(),
            risk_assessment: rules::risk_assessment(profile.risk_tolerance).into(),
            additional_advice: self.config.additional_advice.clone(),
        })
    }

    fn score(
        &self,
        assets: &[AggregatedAsset],
        profile: &InvestorProfile,
        sentiment: Option<&[MarketRecord]>,
    ) -> Result<Vec<ScoredAsset>> {
        let scorer = Scorer::new(&self.config.scoring);
        let mut scored = scorer.score(assets, profile.risk_tolerance, profile.investment_horizon)?;

        if let Some(feed) = sentiment.filter(|f| !f.is_empty()) {
            let blender = SentimentBlender::new(feed, &self.config.sentiment);
            if blender.is_empty() {
                debug!("sentiment feed carried no usable rows");
            } else {
                engine::apply_terms(&mut scored, &[&blender as &dyn ScoringTerm]);
            }
        }

        Ok(scored)
    }
}

/// Mean 24h change over aggregated assets that have one
fn average_change(assets: &[AggregatedAsset]) -> Option<f64> {
    let changes: Vec<f64> = assets.iter().filter_map(|a| a.change_24h).collect();
    if changes.is_empty() {
        None
    } else {
        Some(trends::mean(&changes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::split_sentiment;
    use crate::profile::{InvestmentHorizon, RiskLevel, RiskTolerance};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn btc_eth() -> Vec<MarketRecord> {
        vec![
            MarketRecord::new("Bitcoin", "BTC", "CoinGecko")
                .with_market_cap(1e12)
                .with_change(2.0)
                .with_volume(4e10),
            MarketRecord::new("Ethereum", "ETH", "CoinGecko")
                .with_market_cap(5e11)
                .with_change(-1.0)
                .with_volume(2e10),
        ]
    }

    fn medium_profile() -> InvestorProfile {
        InvestorProfile::new(dec!(1000), RiskTolerance::Medium, InvestmentHorizon::MediumTerm)
    }

    fn snapshot() -> Vec<MarketRecord> {
        let quote = |name: &str, symbol: &str, cap: f64, volume: f64, change: f64| {
            MarketRecord::new(name, symbol, "CoinMarketCap")
                .with_market_cap(cap)
                .with_volume(volume)
                .with_change(change)
        };
        vec![
            quote("Bitcoin", "BTC", 1.2e12, 3.2e10, 2.3),
            quote("Ethereum", "ETH", 3.98e11, 1.2e10, 1.8),
            quote("Binance Coin", "BNB", 8.7e10, 2.1e9, -0.7),
            quote("Solana", "SOL", 6.2e10, 3.2e9, 5.4),
            quote("Cardano", "ADA", 2.3e10, 9.8e8, -1.2),
            quote("Chainlink", "LINK", 8.7e9, 5.4e8, 6.2),
            MarketRecord::new("Arbitrum", "ARB", "Binance Blog").with_sentiment(0.6, "neutral"),
        ]
    }

    #[test]
    fn test_two_asset_example() {
        let analyzer = MarketAnalyzer::new();
        let result = analyzer.recommend_investments(&btc_eth(), &medium_profile(), None);
        let recs = result.success().unwrap();

        assert_eq!(recs.recommendations.len(), 2);
        assert_eq!(recs.recommendations[0].coin, "Ethereum (ETH)");
        assert_eq!(recs.recommendations[0].allocation_percentage, dec!(59.83));
        assert_eq!(recs.recommendations[1].allocation_percentage, dec!(40.17));
        assert_eq!(recs.recommendations[1].allocation_amount, dec!(401.70));
        assert!((recs.total_percentage() - dec!(100)).abs() <= dec!(0.5));

        assert_eq!(recs.recommendations[0].risk_level, RiskLevel::Low);
        assert_eq!(recs.recommendations[0].potential_return, "7-15%");
        assert_eq!(recs.recommendations[0].holding_period, "4-6 months");
        assert!(recs.market_outlook.contains("mildly bullish"));
        assert!(recs.risk_assessment.starts_with("You have a balanced risk appetite"));
    }

    #[test]
    fn test_empty_input_is_error_outcome() {
        let analyzer = MarketAnalyzer::new();

        let rec = analyzer.recommend_investments(&[], &medium_profile(), None);
        assert!(!rec.is_success());
        assert!(!rec.message().unwrap().is_empty());

        let trends = analyzer.analyze_market_trends(&[]);
        assert_eq!(trends.message(), Some("No data available for analysis"));
    }

    #[test]
    fn test_final_list_is_capped_and_rebalanced() {
        let analyzer = MarketAnalyzer::new();
        let profile = InvestorProfile::new(dec!(2500), RiskTolerance::High, InvestmentHorizon::ShortTerm);
        let recs = analyzer.recommend_investments(&snapshot(), &profile, None);
        let recs = recs.success().unwrap();

        assert_eq!(recs.recommendations.len(), 3);
        assert!((recs.total_percentage() - dec!(100)).abs() <= dec!(0.5));
        assert!((recs.total_amount() - dec!(2500)).abs() <= dec!(25));

        let pcts: Vec<Decimal> = recs.recommendations.iter().map(|r| r.allocation_percentage).collect();
        assert!(pcts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_without_rebalance_keeps_shortlist_shares() {
        let config = AnalyzerConfig {
            rebalance_after_cap: false,
            ..Default::default()
        };
        let analyzer = MarketAnalyzer::with_config(config).unwrap();
        let recs = analyzer.recommend_investments(&snapshot(), &medium_profile(), None);
        let recs = recs.success().unwrap();

        assert_eq!(recs.recommendations.len(), 3);
        assert!(recs.total_percentage() < dec!(99.5));
    }

    #[test]
    fn test_length_bounded_by_nonzero_scores() {
        let records = vec![
            MarketRecord::new("Bitcoin", "BTC", "CoinGecko").with_market_cap(1e12),
            MarketRecord::new("Dogecoin", "DOGE", "Kraken Blog").with_sentiment(0.5, "neutral"),
            MarketRecord::new("Polygon", "MATIC", "Kraken Blog").with_sentiment(0.7, "bullish"),
        ];
        let analyzer = MarketAnalyzer::new();
        let recs = analyzer.recommend_investments(&records, &medium_profile(), None);
        let recs = recs.success().unwrap();

        assert_eq!(recs.recommendations.len(), 1);
        assert_eq!(recs.recommendations[0].allocation_percentage, dec!(100));
        assert!(recs.market_outlook.contains("could not be determined"));
    }

    #[test]
    fn test_all_zero_scores_is_error() {
        let records = vec![MarketRecord::new("Arbitrum", "ARB", "Binance Blog")];
        let analyzer = MarketAnalyzer::new();
        let result = analyzer.recommend_investments(&records, &medium_profile(), None);
        assert!(!result.is_success());
    }

    #[test]
    fn test_non_positive_budget_is_error() {
        let profile = InvestorProfile::new(dec!(-5), RiskTolerance::Low, InvestmentHorizon::LongTerm);
        let result = MarketAnalyzer::new().recommend_investments(&btc_eth(), &profile, None);
        assert!(result.message().unwrap().starts_with("Invalid input"));
    }

    #[test]
    fn test_deterministic_output() {
        let analyzer = MarketAnalyzer::new();
        let records = snapshot();
        let sentiment = split_sentiment(&records);
        let first = analyzer.recommend_investments(&records, &medium_profile(), Some(sentiment.as_slice()));
        let second = analyzer.recommend_investments(&records, &medium_profile(), Some(sentiment.as_slice()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_sentiment_shifts_allocation() {
        let analyzer = MarketAnalyzer::new();
        let sentiment = vec![
            MarketRecord::new("Bitcoin", "BTC", "Binance Blog").with_sentiment(0.9, "very bullish"),
        ];

        let plain = analyzer.recommend_investments(&btc_eth(), &medium_profile(), None);
        let blended = analyzer.recommend_investments(&btc_eth(), &medium_profile(), Some(sentiment.as_slice()));

        let btc_share = |r: &AnalysisResult| {
            r.success()
                .unwrap()
                .recommendations
                .iter()
                .find(|rec| rec.coin.starts_with("Bitcoin"))
                .unwrap()
                .allocation_percentage
        };
        assert!(btc_share(&blended) > btc_share(&plain));

        let empty: Vec<MarketRecord> = Vec::new();
        let unchanged = analyzer.recommend_investments(&btc_eth(), &medium_profile(), Some(empty.as_slice()));
        assert_eq!(unchanged, plain);
    }

    #[test]
    fn test_unrecognized_profile_labels_fall_back() {
        let profile = InvestorProfile::new(
            dec!(1000),
            RiskTolerance::parse("YOLO"),
            InvestmentHorizon::parse("someday"),
        );
        let result = MarketAnalyzer::new().recommend_investments(&btc_eth(), &profile, None);
        let recs = result.success().unwrap();

        assert_eq!(recs.recommendations.len(), 2);
        for rec in &recs.recommendations {
            assert_eq!(rec.holding_period, "6 months (default)");
            assert_eq!(rec.potential_return, "10-30%");
        }
        assert_eq!(recs.risk_assessment, "Custom risk profile not recognized.");
        assert!((recs.total_percentage() - dec!(100)).abs() <= dec!(0.5));
    }

    #[test]
    fn test_equal_scores_resolve_alphabetically() {
        let records: Vec<MarketRecord> = ["Zcash", "Tron", "Monero", "Avalanche"]
            .into_iter()
            .map(|name| MarketRecord::new(name, &name[..3], "CoinGecko").with_change(3.0))
            .collect();
        let result = MarketAnalyzer::new().recommend_investments(&records, &medium_profile(), None);
        let coins: Vec<&str> = result
            .success()
            .unwrap()
            .recommendations
            .iter()
            .map(|r| r.coin.as_str())
            .collect();
        assert_eq!(coins, vec!["Avalanche (AVA)", "Monero (MON)", "Tron (TRO)"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalyzerConfig {
            final_size: 0,
            ..Default::default()
        };
        assert!(MarketAnalyzer::with_config(config).is_err());
    }

    #[test]
    fn test_trends_over_raw_records() {
        let analyzer = MarketAnalyzer::new();
        let summary = analyzer.analyze_market_trends(&snapshot());
        let summary = summary.success().unwrap();
        assert_eq!(summary.asset_count, 7);
        assert_eq!(summary.top_gainers[0].name, "Chainlink");
        assert_eq!(summary.top_losers[0].name, "Cardano");
    }
}

//! Simulated Market Feed
//!
//! Fixed five-source snapshot for demos and tests. Three price sources
//! quote overlapping assets; two blog sources carry sentiment only.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::MarketFeed;
use crate::error::{AnalyzerError, Result};
use crate::model::MarketRecord;

const SOURCES: [&str; 5] = [
    "CoinMarketCap",
    "CoinGecko",
    "CryptoCompare",
    "Binance Blog",
    "Kraken Blog",
];

/// Feed backed by a static snapshot
pub struct SimulatedFeed {
    /// Per-source delay, to mimic a scrape
    latency: Duration,
}

impl Default for SimulatedFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedFeed {
    pub fn new() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    fn snapshot(source: &str) -> Option<Vec<MarketRecord>> {
        let quote = |name: &str, symbol: &str, price: f64, cap: f64, volume: f64, change: f64| {
            MarketRecord::new(name, symbol, source)
                .with_price(price)
                .with_market_cap(cap)
                .with_volume(volume)
                .with_change(change)
        };
        let post = |name: &str, symbol: &str, sentiment: f64, trend: &str| {
            MarketRecord::new(name, symbol, source).with_sentiment(sentiment, trend)
        };

        let records = match source {
            "CoinMarketCap" => vec![
                quote("Bitcoin", "BTC", 61_245.32, 1_203_450_000_000.0, 32_450_000_000.0, 2.3),
                quote("Ethereum", "ETH", 3_214.54, 398_760_000_000.0, 12_380_000_000.0, 1.8),
                quote("Binance Coin", "BNB", 542.65, 87_650_000_000.0, 2_134_000_000.0, -0.7),
                quote("Solana", "SOL", 143.21, 62_340_000_000.0, 3_218_000_000.0, 5.4),
                quote("Cardano", "ADA", 0.58, 23_450_000_000.0, 987_000_000.0, -1.2),
            ],
            "CoinGecko" => vec![
                quote("Bitcoin", "BTC", 61_278.12, 1_204_120_000_000.0, 32_520_000_000.0, 2.4),
                quote("Ethereum", "ETH", 3_210.87, 398_230_000_000.0, 12_410_000_000.0, 1.7),
                quote("Ripple", "XRP", 0.58, 31_250_000_000.0, 1_342_000_000.0, 3.2),
                quote("Polkadot", "DOT", 7.32, 9_870_000_000.0, 432_000_000.0, -0.8),
                quote("Avalanche", "AVAX", 36.24, 13_450_000_000.0, 765_000_000.0, 4.3),
            ],
            "CryptoCompare" => vec![
                quote("Bitcoin", "BTC", 61_190.45, 1_202_980_000_000.0, 32_380_000_000.0, 2.2),
                quote("Ethereum", "ETH", 3_216.21, 399_120_000_000.0, 12_350_000_000.0, 1.9),
                quote("Chainlink", "LINK", 14.87, 8_760_000_000.0, 543_000_000.0, 6.2),
                quote("Uniswap", "UNI", 8.43, 6_540_000_000.0, 321_000_000.0, 3.1),
            ],
            "Binance Blog" => vec![
                post("Bitcoin", "BTC", 0.8, "bullish"),
                post("Ethereum", "ETH", 0.7, "bullish"),
                post("Binance Coin", "BNB", 0.85, "very bullish"),
                post("Arbitrum", "ARB", 0.6, "neutral"),
            ],
            "Kraken Blog" => vec![
                post("Bitcoin", "BTC", 0.75, "bullish"),
                post("Ethereum", "ETH", 0.65, "neutral"),
                post("Dogecoin", "DOGE", 0.5, "neutral"),
                post("Polygon", "MATIC", 0.7, "bullish"),
            ],
            _ => return None,
        };
        Some(records)
    }
}

#[async_trait]
impl MarketFeed for SimulatedFeed {
    async fn fetch(&self, sources: &[String]) -> Result<Vec<MarketRecord>> {
        let requested: Vec<&str> = if sources.is_empty() {
            SOURCES.to_vec()
        } else {
            sources.iter().map(|s| s.trim()).collect()
        };

        let mut records = Vec::new();
        for requested_source in requested {
            let source = SOURCES
                .iter()
                .find(|known| known.eq_ignore_ascii_case(requested_source))
                .ok_or_else(|| AnalyzerError::Feed(format!("unknown source '{requested_source}'")))?;

            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }

            let batch = Self::snapshot(source).unwrap_or_default();
            debug!(source, records = batch.len(), "fetched simulated batch");
            records.extend(batch);
        }

        Ok(records)
    }

    fn sources(&self) -> Vec<String> {
        SOURCES.iter().map(ToString::to_string).collect()
    }

    fn name(&self) -> &str {
        "SimulatedFeed"
    }
}

//! Market Feeds
//!
//! Where market records come from. The engine itself never fetches; hosts
//! pull a snapshot through a `MarketFeed` and hand the records over.

mod simulated;

pub use simulated::SimulatedFeed;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::MarketRecord;

/// Source of market snapshots
///
/// Implement this for each provider: exchange APIs, aggregator sites,
/// news blogs carrying sentiment tags.
#[async_trait]
pub trait MarketFeed: Send + Sync {
    /// Fetch records from the named sources, in the order given.
    /// An empty slice means every source the feed knows.
    async fn fetch(&self, sources: &[String]) -> Result<Vec<MarketRecord>>;

    /// Sources this feed can serve
    fn sources(&self) -> Vec<String>;

    /// Feed name
    fn name(&self) -> &str;
}

//! Application State

use std::sync::Arc;

use crypto_analyzer::{MarketAnalyzer, MarketFeed};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Stateless analysis engine
    pub analyzer: Arc<MarketAnalyzer>,

    /// Where snapshots come from when a request carries no records
    pub feed: Arc<dyn MarketFeed>,

    /// Sources used when a request names none (empty = all)
    pub default_sources: Arc<Vec<String>>,
}

impl AppState {
    /// Request sources if given, otherwise the configured defaults
    pub fn sources_or_default(&self, requested: Option<Vec<String>>) -> Vec<String> {
        match requested {
            Some(sources) if !sources.is_empty() => sources,
            _ => self.default_sources.as_ref().clone(),
        }
    }
}

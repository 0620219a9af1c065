//! Aggregator
//!
//! Collapses multi-source observations into one row per asset name.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{AnalyzerError, Result};
use crate::model::{AggregatedAsset, MarketRecord};

/// Running mean that ignores absent observations
#[derive(Default)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

#[derive(Default)]
struct Group {
    name: String,
    symbol: Option<String>,
    price: Mean,
    market_cap: Mean,
    volume_24h: Mean,
    change_24h: Mean,
    sources: Vec<String>,
}

/// Non-negative, finite metric; anything else is treated as absent
fn non_negative(field: &str, record: &MarketRecord, value: Option<f64>) -> Option<f64> {
    let v = value?;
    if v.is_finite() && v >= 0.0 {
        Some(v)
    } else {
        warn!(asset = %record.name, source = %record.source, field, value = v, "dropping invalid metric");
        None
    }
}

fn finite(field: &str, record: &MarketRecord, value: Option<f64>) -> Option<f64> {
    let v = value?;
    if v.is_finite() {
        Some(v)
    } else {
        warn!(asset = %record.name, source = %record.source, field, "dropping non-finite metric");
        None
    }
}

/// Group records by name, averaging each numeric field over the records
/// where it is present. Output is sorted by name, so equal scores later
/// resolve alphabetically.
pub fn aggregate(records: &[MarketRecord]) -> Result<Vec<AggregatedAsset>> {
    if records.is_empty() {
        return Err(AnalyzerError::EmptyInput("aggregation".into()));
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for record in records {
        let name = record.name.trim();
        if name.is_empty() {
            warn!(source = %record.source, "skipping record without a name");
            continue;
        }

        let slot = *index.entry(name).or_insert_with(|| {
            groups.push(Group {
                name: name.to_string(),
                ..Default::default()
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];

        if group.symbol.is_none() {
            group.symbol = record
                .symbol
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_uppercase);
        }
        group.price.push(non_negative("price", record, record.price));
        group.market_cap.push(non_negative("market_cap", record, record.market_cap));
        group.volume_24h.push(non_negative("volume_24h", record, record.volume_24h));
        group.change_24h.push(finite("change_24h", record, record.change_24h));

        if !group.sources.iter().any(|s| s == &record.source) {
            group.sources.push(record.source.clone());
        }
    }

    if groups.is_empty() {
        return Err(AnalyzerError::EmptyInput("aggregation".into()));
    }

    groups.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(records = records.len(), assets = groups.len(), "aggregated market records");

    Ok(groups
        .into_iter()
        .map(|g| AggregatedAsset {
            name: g.name,
            symbol: g.symbol,
            price: g.price.value(),
            market_cap: g.market_cap.value(),
            volume_24h: g.volume_24h.value(),
            change_24h: g.change_24h.value(),
            sources: g.sources,
        })
        .collect())
}

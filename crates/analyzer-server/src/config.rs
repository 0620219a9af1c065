//! Server Configuration
//!
//! Read from the environment after `.env` has been loaded.

use std::path::PathBuf;

/// Runtime settings for the HTTP server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address (`BIND_ADDR`)
    pub bind_addr: String,

    /// Optional analyzer config JSON (`ANALYZER_CONFIG`)
    pub analyzer_config: Option<PathBuf>,

    /// Sources fetched when a request names none (`MARKET_SOURCES`)
    pub default_sources: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".into()),
            analyzer_config: lookup("ANALYZER_CONFIG")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            default_sources: lookup("MARKET_SOURCES")
                .map(|raw| parse_sources(&raw))
                .unwrap_or_default(),
        }
    }
}

/// Split a comma-separated source list, dropping blanks
pub fn parse_sources(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

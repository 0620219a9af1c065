//! Asset Classification
//!
//! Single source of truth for which assets count as reference (blue chip)
//! and which as high-volatility. Shared by the scorer's bias rules and the
//! risk-level narrative so the two never disagree.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// Blue chips (Bitcoin, Ethereum)
    Reference,
    /// Meme / speculative coins
    HighVolatility,
    /// Mid caps and newer projects
    Standard,
}

impl AssetClass {
    /// Base risk index before the user's tolerance offset is applied
    pub fn base_risk(self) -> i32 {
        match self {
            Self::Reference => 1,
            Self::HighVolatility => 4,
            Self::Standard => 2,
        }
    }
}

/// Name-based classification sets. Matching is exact on the asset name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetClassifier {
    pub reference: BTreeSet<String>,
    pub high_volatility: BTreeSet<String>,
}

impl Default for AssetClassifier {
    fn default() -> Self {
        Self {
            reference: ["Bitcoin", "Ethereum"].into_iter().map(String::from).collect(),
            high_volatility: ["Dogecoin", "Shiba Inu", "Pepe"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl AssetClassifier {
    pub fn classify(&self, name: &str) -> AssetClass {
        if self.reference.contains(name) {
            AssetClass::Reference
        } else if self.high_volatility.contains(name) {
            AssetClass::HighVolatility
        } else {
            AssetClass::Standard
        }
    }

    pub fn is_reference(&self, name: &str) -> bool {
        self.classify(name) == AssetClass::Reference
    }

    /// Names listed in both sets
    pub fn overlap(&self) -> Vec<&str> {
        self.reference
            .intersection(&self.high_volatility)
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_classification() {
        let classifier = AssetClassifier::default();
        assert_eq!(classifier.classify("Bitcoin"), AssetClass::Reference);
        assert_eq!(classifier.classify("Ethereum"), AssetClass::Reference);
        assert_eq!(classifier.classify("Dogecoin"), AssetClass::HighVolatility);
        assert_eq!(classifier.classify("Solana"), AssetClass::Standard);
        // Exact match only
        assert_eq!(classifier.classify("bitcoin"), AssetClass::Standard);
    }

    #[test]
    fn test_base_risk() {
        assert_eq!(AssetClass::Reference.base_risk(), 1);
        assert_eq!(AssetClass::HighVolatility.base_risk(), 4);
        assert_eq!(AssetClass::Standard.base_risk(), 2);
    }

    #[test]
    fn test_overlap_detection() {
        let mut classifier = AssetClassifier::default();
        assert!(classifier.overlap().is_empty());
        classifier.high_volatility.insert("Ethereum".into());
        assert_eq!(classifier.overlap(), vec!["Ethereum"]);
    }
}

//! Investor Profile
//!
//! The user parameters of an analysis run: risk tolerance and investment
//! horizon, plus the five-level risk label used for per-asset output.
//!
//! Values outside the known label sets parse to `Unrecognized` instead of
//! failing, so every rule table can fall back to its default entry.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// User risk tolerance, ordered from most to least conservative
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskTolerance {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
    Unrecognized,
}

impl RiskTolerance {
    pub const ALL: [Self; 5] = [Self::VeryLow, Self::Low, Self::Medium, Self::High, Self::VeryHigh];

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Unrecognized => "Unrecognized",
        }
    }

    /// Parse a label, case-insensitively. Unknown labels become `Unrecognized`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "very low" => Self::VeryLow,
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "very high" => Self::VeryHigh,
            _ => Self::Unrecognized,
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for RiskTolerance {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<RiskTolerance> for String {
    fn from(t: RiskTolerance) -> Self {
        t.label().to_string()
    }
}

/// Investment time frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvestmentHorizon {
    ShortTerm,
    MediumTerm,
    LongTerm,
    Unrecognized,
}

impl InvestmentHorizon {
    pub const ALL: [Self; 3] = [Self::ShortTerm, Self::MediumTerm, Self::LongTerm];

    pub fn label(self) -> &'static str {
        match self {
            Self::ShortTerm => "Short-term (0-3 months)",
            Self::MediumTerm => "Medium-term (3-12 months)",
            Self::LongTerm => "Long-term (1+ years)",
            Self::Unrecognized => "Unrecognized",
        }
    }

    /// Accepts the full label or its short form ("Short-term").
    pub fn parse(s: &str) -> Self {
        let lower = s.trim().to_ascii_lowercase();
        let head = lower.split_once(" (").map_or(lower.as_str(), |(head, _)| head);
        let canonical = match head {
            "short-term" => Self::ShortTerm,
            "medium-term" => Self::MediumTerm,
            "long-term" => Self::LongTerm,
            _ => return Self::Unrecognized,
        };
        // A parenthesised suffix must be the canonical one
        if head.len() == lower.len() || lower == canonical.label().to_ascii_lowercase() {
            canonical
        } else {
            Self::Unrecognized
        }
    }
}

impl fmt::Display for InvestmentHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for InvestmentHorizon {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<InvestmentHorizon> for String {
    fn from(h: InvestmentHorizon) -> Self {
        h.label().to_string()
    }
}

/// Normalized per-asset risk label (1 = Very Low .. 5 = Very High)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    pub const ALL: [Self; 5] = [Self::VeryLow, Self::Low, Self::Medium, Self::High, Self::VeryHigh];

    /// Map an integer index onto the label set, clamping to [1, 5]
    pub fn from_index(index: i32) -> Self {
        match index.clamp(1, 5) {
            1 => Self::VeryLow,
            2 => Self::Low,
            3 => Self::Medium,
            4 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters supplied by the user for one recommendation run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvestorProfile {
    /// Budget to allocate, in USD
    #[serde(with = "rust_decimal::serde::float")]
    pub investment_amount: Decimal,

    pub risk_tolerance: RiskTolerance,

    pub investment_horizon: InvestmentHorizon,
}

impl InvestorProfile {
    pub fn new(
        investment_amount: Decimal,
        risk_tolerance: RiskTolerance,
        investment_horizon: InvestmentHorizon,
    ) -> Self {
        Self {
            investment_amount,
            risk_tolerance,
            investment_horizon,
        }
    }
}

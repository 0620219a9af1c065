//! Narrative rule tables.
//!
//! Every table is an exhaustive match over enum keys, so each combination
//! is visible and testable on its own. Unrecognized inputs map to the
//! fallback entries rather than failing.

use crate::classify::AssetClass;
use crate::profile::{InvestmentHorizon, RiskLevel, RiskTolerance};

/// Offset added to an asset's base risk for the user's tolerance
pub fn tolerance_offset(tolerance: RiskTolerance) -> i32 {
    match tolerance {
        RiskTolerance::VeryLow => -1,
        RiskTolerance::Low => 0,
        RiskTolerance::Medium | RiskTolerance::Unrecognized => 1,
        RiskTolerance::High => 2,
        RiskTolerance::VeryHigh => 3,
    }
}

pub fn risk_level(class: AssetClass, tolerance: RiskTolerance) -> RiskLevel {
    RiskLevel::from_index(class.base_risk() + tolerance_offset(tolerance))
}

pub fn holding_period(
    horizon: InvestmentHorizon,
    tolerance: RiskTolerance,
    is_reference: bool,
) -> &'static str {
    use RiskTolerance as T;

    match horizon {
        InvestmentHorizon::ShortTerm => match tolerance {
            T::Low | T::Medium => "1-3 months",
            _ => "2-6 weeks",
        },
        InvestmentHorizon::MediumTerm => match tolerance {
            T::VeryLow | T::Low => "6-9 months",
            T::Medium => "4-6 months",
            _ => "3-5 months",
        },
        InvestmentHorizon::LongTerm if is_reference => "2+ years",
        InvestmentHorizon::LongTerm => match tolerance {
            T::Medium | T::High => "1-2 years",
            _ => "2-3 years",
        },
        InvestmentHorizon::Unrecognized => "6 months (default)",
    }
}

pub fn potential_return(level: RiskLevel, horizon: InvestmentHorizon) -> &'static str {
    use InvestmentHorizon as H;

    match (level, horizon) {
        (RiskLevel::VeryLow, H::ShortTerm) => "2-5%",
        (RiskLevel::VeryLow, H::MediumTerm) => "5-10%",
        (RiskLevel::VeryLow, H::LongTerm) => "10-20%",
        (RiskLevel::Low, H::ShortTerm) => "3-7%",
        (RiskLevel::Low, H::MediumTerm) => "7-15%",
        (RiskLevel::Low, H::LongTerm) => "15-30%",
        (RiskLevel::Medium, H::ShortTerm) => "5-15%",
        (RiskLevel::Medium, H::MediumTerm) => "10-25%",
        (RiskLevel::Medium, H::LongTerm) => "25-50%",
        (RiskLevel::High, H::ShortTerm) => "10-25%",
        (RiskLevel::High, H::MediumTerm) => "20-50%",
        (RiskLevel::High, H::LongTerm) => "40-80%",
        (RiskLevel::VeryHigh, H::ShortTerm) => "15-40%",
        (RiskLevel::VeryHigh, H::MediumTerm) => "30-70%",
        (RiskLevel::VeryHigh, H::LongTerm) => "60-150%",
        (_, H::Unrecognized) => "10-30%",
    }
}

/// Outlook sentence for the average 24h change of the aggregated set
pub fn market_outlook(avg_change_24h: Option<f64>) -> &'static str {
    match avg_change_24h {
        None => "Market sentiment could not be determined due to lack of recent change data.",
        Some(avg) if avg > 3.0 => {
            "The market is showing strong bullish momentum with several coins trending upward."
        }
        Some(avg) if avg > 0.0 => {
            "The market is mildly bullish, indicating growing investor confidence."
        }
        Some(avg) if avg > -3.0 => {
            "The market is showing mild bearish behavior. Some coins are stabilizing while others decline."
        }
        Some(_) => {
            "The market is in a bearish trend, and caution is advised for short-term investors."
        }
    }
}

/// Four-tier label used by the trend reporter
pub fn market_sentiment(avg_change_24h: Option<f64>) -> &'static str {
    match avg_change_24h {
        None => "neutral",
        Some(avg) if avg > 3.0 => "strongly bullish",
        Some(avg) if avg > 0.0 => "mildly bullish",
        Some(avg) if avg > -3.0 => "mildly bearish",
        Some(_) => "strongly bearish",
    }
}

pub fn risk_assessment(tolerance: RiskTolerance) -> &'static str {
    match tolerance {
        RiskTolerance::VeryLow => {
            "You prefer minimal risk and capital preservation. \
             The portfolio emphasizes large-cap, stable assets like Bitcoin and Ethereum."
        }
        RiskTolerance::Low => {
            "You are cautious but open to moderate growth. \
             The portfolio contains a balance of stability and carefully selected growth assets."
        }
        RiskTolerance::Medium => {
            "You have a balanced risk appetite. \
             This portfolio mixes well-established coins with mid-cap options for better upside."
        }
        RiskTolerance::High => {
            "You're comfortable with volatility and seeking higher returns. \
             This portfolio includes emerging coins with strong potential."
        }
        RiskTolerance::VeryHigh => {
            "You are aggressive and aiming for maximum returns. \
             The portfolio leans into high-risk, high-reward assets with growth upside."
        }
        RiskTolerance::Unrecognized => "Custom risk profile not recognized.",
    }
}

//! Error Types for the Market Analyzer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// No usable market records were supplied
    #[error("No data available: {0}")]
    EmptyInput(String),

    /// Total score is zero, so no proportional split exists
    #[error("Allocation failed: {0}")]
    Allocation(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    /// Message suitable for the `message` field of an error result
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyInput(what) => format!("No data available for {what}"),
            Self::Allocation(_) => {
                "No asset received a positive score, so there is nothing to allocate.".into()
            }
            Self::InvalidParameter(msg) => format!("Invalid input: {msg}"),
            Self::Feed(msg) => format!("Market data unavailable: {msg}"),
            Self::Config(_) | Self::Serialization(_) | Self::Io(_) => {
                "An unexpected error occurred during analysis.".into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_not_empty() {
        let errors = [
            AnalyzerError::EmptyInput("recommendations".into()),
            AnalyzerError::Allocation("total score is 0".into()),
            AnalyzerError::InvalidParameter("investment_amount must be positive".into()),
            AnalyzerError::Config("shortlist_size must be at least 1".into()),
        ];
        for err in &errors {
            assert!(!err.user_message().is_empty());
        }
    }

    #[test]
    fn test_empty_input_message_names_the_operation() {
        let err = AnalyzerError::EmptyInput("analysis".into());
        assert_eq!(err.user_message(), "No data available for analysis");
    }
}

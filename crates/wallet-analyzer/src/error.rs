//! Error Types for Wallet Analyzer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Aggregation needs at least one token
    #[error("Cannot analyze an empty portfolio")]
    EmptyPortfolio,

    #[error("Trust data unavailable for {0}")]
    TrustUnavailable(String),

    #[error("Trust lookup failed: {0}")]
    TrustLookup(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnalyzerError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            AnalyzerError::EmptyPortfolio => "EMPTY_PORTFOLIO",
            AnalyzerError::TrustUnavailable(_) | AnalyzerError::TrustLookup(_) => "TRUST_LOOKUP",
            AnalyzerError::InvalidInput(_) => "INVALID_INPUT",
            AnalyzerError::Config(_) => "CONFIG",
            AnalyzerError::Network(_) => "NETWORK",
            AnalyzerError::Serialization(_) => "SERIALIZATION",
        }
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AnalyzerError::EmptyPortfolio => {
                "No tokens found in this wallet or wallet address is invalid.".into()
            }
            AnalyzerError::InvalidInput(msg) => format!("Invalid request: {}", msg),
            AnalyzerError::TrustUnavailable(_)
            | AnalyzerError::TrustLookup(_)
            | AnalyzerError::Network(_) => {
                "Token verification data is currently unavailable.".into()
            }
            _ => "An unexpected error occurred.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_portfolio_message() {
        let err = AnalyzerError::EmptyPortfolio;
        assert_eq!(err.code(), "EMPTY_PORTFOLIO");
        assert!(err.user_message().contains("No tokens"));
    }

    #[test]
    fn test_invalid_input_keeps_detail() {
        let err = AnalyzerError::InvalidInput("2 tokens but 3 trust records".into());
        assert_eq!(err.code(), "INVALID_INPUT");
        assert!(err.user_message().contains("3 trust records"));
    }
}

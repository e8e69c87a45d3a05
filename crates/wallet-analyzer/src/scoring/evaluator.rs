//! Token Risk Evaluator
//!
//! Turns a balance and its trust record into an [`AnalyzedToken`]:
//! risk level and label, classification, then alerts.

use crate::error::{AnalyzerError, Result};
use crate::model::{AnalyzedToken, RiskLevel, TokenBalance, TrustRecord};

use super::alerts::generate_alerts;
use super::classifier::{classify_token, MarketMetrics};

const HIGH_RISK_SCORE: f64 = 70.0;
const LOW_RISK_SCORE: f64 = 30.0;

/// Decide the risk level and label for a trust record; first matching arm wins
pub fn assess_risk(trust: Option<&TrustRecord>) -> (RiskLevel, &'static str) {
    match trust {
        None => (RiskLevel::Medium, "Unknown"),
        Some(t) if t.flagged => (RiskLevel::High, "Flagged"),
        Some(t) if t.is_verified => (RiskLevel::Low, "Verified"),
        Some(t) if t.risk_score > HIGH_RISK_SCORE => (RiskLevel::High, "High Risk"),
        Some(t) if t.risk_score < LOW_RISK_SCORE => (RiskLevel::Low, "Low Risk"),
        Some(_) => (RiskLevel::Medium, "Medium Risk"),
    }
}

/// Analyze one token in isolation
pub fn analyze_token(token: TokenBalance, trust: Option<TrustRecord>) -> AnalyzedToken {
    let (risk_level, risk_label) = assess_risk(trust.as_ref());
    let classification = classify_token(&token.symbol, &MarketMetrics::from(&token));
    let alerts = generate_alerts(&token, trust.as_ref(), &classification);

    tracing::debug!(
        mint = %token.mint,
        symbol = %token.symbol,
        ?risk_level,
        category = %classification.category,
        alerts = alerts.len(),
        "Analyzed token"
    );

    AnalyzedToken {
        balance: token,
        trust,
        risk_level,
        risk_label: risk_label.into(),
        classification: Some(classification),
        alerts,
    }
}

/// Analyze a batch of tokens with trust records aligned by index.
///
/// Output keeps input order.
pub fn analyze_tokens(
    tokens: Vec<TokenBalance>,
    trust: Vec<Option<TrustRecord>>,
) -> Result<Vec<AnalyzedToken>> {
    if tokens.len() != trust.len() {
        return Err(AnalyzerError::InvalidInput(format!(
            "{} tokens but {} trust records",
            tokens.len(),
            trust.len()
        )));
    }

    Ok(tokens
        .into_iter()
        .zip(trust)
        .map(|(token, record)| analyze_token(token, record))
        .collect())
}

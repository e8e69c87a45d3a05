//! Advanced Risk Scorer
//!
//! Value-weighted portfolio risk. A separate lens from the level-weighted
//! score of the aggregator; the two need not agree.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use crate::model::{AnalyzedToken, TokenCategory, TrustRecord};

const NEUTRAL_SCORE: f64 = 50.0;
const FLAGGED_RISK: f64 = 90.0;
const VERIFIED_RISK: f64 = 10.0;
const FRAUD_RISK: f64 = 95.0;

const SMALL_MARKET_CAP: Decimal = dec!(1000000);
const FEW_HOLDERS: u64 = 1_000;
const THIN_VOLUME: Decimal = dec!(10000);

/// Risk of a single token before weighting (may exceed 0..=100)
pub fn token_risk(token: &AnalyzedToken) -> f64 {
    let mut risk = token.trust.as_ref().map_or(NEUTRAL_SCORE, base_risk);

    let balance = &token.balance;
    if balance.market_cap.is_some_and(|cap| cap < SMALL_MARKET_CAP) {
        risk += 20.0;
    }
    if balance.holder_count.is_some_and(|holders| holders < FEW_HOLDERS) {
        risk += 15.0;
    }
    if balance.volume_24h.is_some_and(|volume| volume < THIN_VOLUME) {
        risk += 10.0;
    }

    match token.classification.as_ref().map(|c| c.category) {
        Some(TokenCategory::Scam | TokenCategory::Rug) => FRAUD_RISK,
        Some(TokenCategory::Meme) => risk + 20.0,
        Some(TokenCategory::Utility | TokenCategory::DeFi) => risk - 10.0,
        _ => risk,
    }
}

fn base_risk(trust: &TrustRecord) -> f64 {
    if trust.flagged {
        FLAGGED_RISK
    } else if trust.is_verified {
        VERIFIED_RISK
    } else {
        trust.risk_score
    }
}

/// Holding weight: amount × price, with a missing price counted as 1.
///
/// Products beyond the Decimal range are computed in f64.
fn weight(token: &AnalyzedToken) -> f64 {
    let amount = token.balance.ui_amount;
    let price = token.balance.price.unwrap_or(Decimal::ONE);

    amount
        .checked_mul(price)
        .and_then(|value| value.to_f64())
        .unwrap_or_else(|| amount.to_f64().unwrap_or(0.0) * price.to_f64().unwrap_or(0.0))
}

/// Value-weighted average of per-token risk, clamped to [0, 100].
///
/// Returns 50 when the total weight is zero (e.g. no tokens, or all amounts zero).
pub fn calculate_advanced_risk_score(tokens: &[AnalyzedToken]) -> f64 {
    let (score, total_weight) = tokens.iter().fold((0.0, 0.0), |(score, total), token| {
        let w = weight(token);
        (score + token_risk(token) * w, total + w)
    });

    if total_weight > 0.0 {
        (score / total_weight).clamp(0.0, 100.0)
    } else {
        NEUTRAL_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classification, RiskLevel, TokenBalance};

    fn analyzed(balance: TokenBalance, trust: Option<TrustRecord>, category: Option<TokenCategory>) -> AnalyzedToken {
        AnalyzedToken {
            balance,
            trust,
            risk_level: RiskLevel::Medium,
            risk_label: String::new(),
            classification: category.map(|category| Classification {
                category,
                confidence: 0.5,
                reasoning: String::new(),
            }),
            alerts: Vec::new(),
        }
    }

    fn trust(flagged: bool, is_verified: bool, risk_score: f64) -> TrustRecord {
        TrustRecord {
            flagged,
            is_verified,
            risk_score,
            ..TrustRecord::fallback("mint")
        }
    }

    #[test]
    fn test_zero_weight_is_neutral() {
        let tokens = vec![
            analyzed(TokenBalance::new("A", "AAA", Decimal::ZERO), Some(trust(true, false, 99.0)), None),
            analyzed(TokenBalance::new("B", "BBB", Decimal::ZERO), None, Some(TokenCategory::Scam)),
        ];
        assert!((calculate_advanced_risk_score(&tokens) - 50.0).abs() < f64::EPSILON);
        assert!((calculate_advanced_risk_score(&[]) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_base_risk_precedence() {
        let b = || TokenBalance::new("A", "AAA", dec!(1));
        assert!((token_risk(&analyzed(b(), Some(trust(true, true, 0.0)), None)) - 90.0).abs() < f64::EPSILON);
        assert!((token_risk(&analyzed(b(), Some(trust(false, true, 80.0)), None)) - 10.0).abs() < f64::EPSILON);
        assert!((token_risk(&analyzed(b(), Some(trust(false, false, 37.0)), None)) - 37.0).abs() < f64::EPSILON);
        assert!((token_risk(&analyzed(b(), None, None)) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_market_penalties_add_up() {
        let balance = TokenBalance::new("A", "AAA", dec!(1))
            .with_market_cap(dec!(500000))
            .with_holder_count(200)
            .with_volume_24h(dec!(50));
        // 50 + 20 + 15 + 10
        assert!((token_risk(&analyzed(balance, None, None)) - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_classification_adjustments() {
        let balance = || TokenBalance::new("A", "AAA", dec!(1)).with_market_cap(dec!(10));
        let verified = || Some(trust(false, true, 0.0));

        // fraud overrides instead of adding
        assert!((token_risk(&analyzed(balance(), verified(), Some(TokenCategory::Rug))) - 95.0).abs() < f64::EPSILON);
        // 10 + 20 + 20
        assert!((token_risk(&analyzed(balance(), verified(), Some(TokenCategory::Meme))) - 50.0).abs() < f64::EPSILON);
        // 10 + 20 - 10
        assert!((token_risk(&analyzed(balance(), verified(), Some(TokenCategory::DeFi))) - 20.0).abs() < f64::EPSILON);
        assert!((token_risk(&analyzed(balance(), verified(), Some(TokenCategory::Gaming))) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_value_weighting() {
        // $900 of a verified token (risk 10), $100 of a flagged one (risk 90)
        let tokens = vec![
            analyzed(
                TokenBalance::new("A", "SAFE", dec!(9)).with_price(dec!(100)),
                Some(trust(false, true, 0.0)),
                None,
            ),
            analyzed(
                TokenBalance::new("B", "BAD", dec!(100)).with_price(dec!(1)),
                Some(trust(true, false, 0.0)),
                None,
            ),
        ];
        assert!((calculate_advanced_risk_score(&tokens) - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_price_weighs_as_one() {
        let tokens = vec![
            analyzed(TokenBalance::new("A", "A", dec!(3)), Some(trust(false, false, 20.0)), None),
            analyzed(TokenBalance::new("B", "B", dec!(1)), Some(trust(false, false, 60.0)), None),
        ];
        // (3*20 + 1*60) / 4
        assert!((calculate_advanced_risk_score(&tokens) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_metrics_count_as_present() {
        let balance = TokenBalance::new("A", "AAA", dec!(1))
            .with_market_cap(Decimal::ZERO)
            .with_holder_count(0)
            .with_volume_24h(Decimal::ZERO);
        // 50 + 20 + 15 + 10
        assert!((token_risk(&analyzed(balance, None, None)) - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_oversized_holdings_still_score() {
        let huge = analyzed(
            TokenBalance::new("A", "HUGE", dec!(1000000000000000)).with_price(dec!(1000000000000000)),
            Some(trust(false, false, 40.0)),
            None,
        );
        assert!((calculate_advanced_risk_score(&[huge.clone()]) - 40.0).abs() < 1e-9);

        // 1e30 against 1: the small holding barely moves the mean
        let small = analyzed(
            TokenBalance::new("B", "SMALL", dec!(1)).with_price(dec!(1)),
            Some(trust(true, false, 0.0)),
            None,
        );
        let score = calculate_advanced_risk_score(&[huge, small]);
        assert!((score - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_result_is_clamped() {
        let balance = TokenBalance::new("A", "PEPE", dec!(1))
            .with_market_cap(dec!(1))
            .with_holder_count(1)
            .with_volume_24h(dec!(1));
        let high = analyzed(balance, Some(trust(true, false, 0.0)), Some(TokenCategory::Meme));
        assert!((calculate_advanced_risk_score(&[high]) - 100.0).abs() < f64::EPSILON);

        let low = analyzed(
            TokenBalance::new("B", "USDC", dec!(1)),
            Some(trust(false, false, 3.0)),
            Some(TokenCategory::Utility),
        );
        assert!(calculate_advanced_risk_score(&[low]).abs() < f64::EPSILON);
    }
}

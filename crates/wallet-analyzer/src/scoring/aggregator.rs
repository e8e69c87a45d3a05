//! Portfolio Aggregator
//!
//! Reduces analyzed tokens into portfolio statistics, a risk score, a
//! diversification score and a label/badge.
//!
//! Label and badge are two steps: [`select_label`] picks the label with its
//! base badge, then [`apply_diversification_override`] may swap the badge
//! alone. A Degen portfolio that is also well diversified stays Degen but
//! carries the legendary badge.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{AnalyzerError, Result};
use crate::model::{
    AnalyzedToken, Badge, BadgeRarity, OverallLabel, PortfolioAnalysis, RiskDistribution, RiskLevel,
    TokenCategory,
};

/// Per-level weights of the portfolio risk score
const LOW_WEIGHT: usize = 20;
const MEDIUM_WEIGHT: usize = 50;
const HIGH_WEIGHT: usize = 80;

/// Share (percent) of high or low risk tokens needed for Degen / Investor
const LABEL_THRESHOLD_PERCENT: f64 = 60.0;

/// Diversification score above which the legendary badge replaces the base badge
const DIVERSIFICATION_BADGE_THRESHOLD: f64 = 80.0;

/// Label chosen for a portfolio, with its base badge
#[derive(Clone, Debug, PartialEq)]
pub struct LabelSelection {
    pub label: OverallLabel,
    pub emoji: &'static str,
    pub description: &'static str,
    pub badge: Badge,
}

fn badge(
    id: &str,
    name: &str,
    emoji: &str,
    description: &str,
    rarity: BadgeRarity,
    now: DateTime<Utc>,
) -> Badge {
    Badge {
        id: id.into(),
        name: name.into(),
        emoji: emoji.into(),
        description: description.into(),
        rarity,
        unlocked_at: now,
    }
}

/// Pick the overall label from the risk mix: Degen, then Investor, else Normie
pub fn select_label(distribution: &RiskDistribution, now: DateTime<Utc>) -> LabelSelection {
    if distribution.percent(RiskLevel::High) > LABEL_THRESHOLD_PERCENT {
        LabelSelection {
            label: OverallLabel::Degen,
            emoji: "🎲",
            description: "You love living on the edge with high-risk tokens!",
            badge: badge(
                "degen-master",
                "Degen Master",
                "🎲",
                "Fearless risk-taker with 60%+ high-risk tokens",
                BadgeRarity::Epic,
                now,
            ),
        }
    } else if distribution.percent(RiskLevel::Low) > LABEL_THRESHOLD_PERCENT {
        LabelSelection {
            label: OverallLabel::Investor,
            emoji: "🧠",
            description: "You prefer stable, verified tokens. Smart moves!",
            badge: badge(
                "wise-investor",
                "Wise Investor",
                "🧠",
                "Strategic investor with 60%+ low-risk tokens",
                BadgeRarity::Rare,
                now,
            ),
        }
    } else {
        LabelSelection {
            label: OverallLabel::Normie,
            emoji: "⚖️",
            description: "You have a balanced mix of risk levels. Playing it safe!",
            badge: badge(
                "balanced-trader",
                "Balanced Trader",
                "⚖️",
                "Maintains a balanced risk portfolio",
                BadgeRarity::Common,
                now,
            ),
        }
    }
}

/// Replace the badge with "Diversification Expert" when the score is above 80
pub fn apply_diversification_override(
    base: Badge,
    diversification_score: f64,
    now: DateTime<Utc>,
) -> Badge {
    if diversification_score > DIVERSIFICATION_BADGE_THRESHOLD {
        badge(
            "diversification-expert",
            "Diversification Expert",
            "🌈",
            "Master of portfolio diversification",
            BadgeRarity::Legendary,
            now,
        )
    } else {
        base
    }
}

/// round((20·low + 50·medium + 80·high) / total); 0 for an empty distribution
pub fn risk_score(distribution: &RiskDistribution) -> u8 {
    let total = distribution.total();
    if total == 0 {
        return 0;
    }

    let weighted = distribution.low * LOW_WEIGHT
        + distribution.medium * MEDIUM_WEIGHT
        + distribution.high * HIGH_WEIGHT;
    let score = (weighted as f64 / total as f64).round();
    score.clamp(0.0, 100.0) as u8
}

/// Category coverage over the fixed set of 8, capped at 100
pub fn diversification_score(distinct_categories: usize) -> f64 {
    let coverage = distinct_categories as f64 / TokenCategory::ALL.len() as f64 * 100.0;
    coverage.min(100.0)
}

/// Aggregate analyzed tokens into a portfolio analysis.
///
/// Returns [`AnalyzerError::EmptyPortfolio`] for an empty slice.
pub fn analyze_portfolio(tokens: &[AnalyzedToken]) -> Result<PortfolioAnalysis> {
    analyze_portfolio_at(tokens, Utc::now())
}

/// [`analyze_portfolio`] with an explicit computation time for badges
pub fn analyze_portfolio_at(tokens: &[AnalyzedToken], now: DateTime<Utc>) -> Result<PortfolioAnalysis> {
    if tokens.is_empty() {
        return Err(AnalyzerError::EmptyPortfolio);
    }

    let total_value = tokens.iter().try_fold(Decimal::ZERO, |total, token| {
        total.checked_add(token.value()?).ok_or_else(|| {
            AnalyzerError::InvalidInput("total portfolio value is out of range".into())
        })
    })?;
    let risk_distribution: RiskDistribution = tokens.iter().collect();

    let mut category_distribution: BTreeMap<TokenCategory, usize> = BTreeMap::new();
    for token in tokens {
        *category_distribution.entry(token.category()).or_insert(0) += 1;
    }

    let risk_score = risk_score(&risk_distribution);
    let diversification_score = diversification_score(category_distribution.len());

    let selection = select_label(&risk_distribution, now);
    let badge = apply_diversification_override(selection.badge, diversification_score, now);

    Ok(PortfolioAnalysis {
        total_tokens: tokens.len(),
        total_value,
        risk_distribution,
        category_distribution,
        overall_label: selection.label,
        badge,
        emoji: selection.emoji.into(),
        description: selection.description.into(),
        risk_score,
        diversification_score,
    })
}

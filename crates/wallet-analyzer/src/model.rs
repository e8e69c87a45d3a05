//! Domain Models
//!
//! Core data types for wallet portfolio analysis.
//! Uses `rust_decimal` for balances, prices and market figures - never use f64 for money!
//! Scores and confidences stay `f64`.
//!
//! Field names serialize in camelCase to match the shape of the upstream
//! balance and Shield feeds.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};

/// A token balance held by a wallet, as delivered by the balance-fetch collaborator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    /// Token mint address
    pub mint: String,

    /// Ticker symbol
    pub symbol: String,

    /// Raw on-chain balance (base units)
    #[serde(default)]
    pub balance: u64,

    /// Decimal places of the mint
    #[serde(default)]
    pub decimals: u8,

    /// Human-readable amount (balance / 10^decimals)
    pub ui_amount: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_24h: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder_count: Option<u64>,

    /// Price in USD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    /// 24-hour price change percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change_24h: Option<Decimal>,
}

impl TokenBalance {
    pub fn new(mint: impl Into<String>, symbol: impl Into<String>, ui_amount: Decimal) -> Self {
        Self {
            mint: mint.into(),
            symbol: symbol.into(),
            balance: 0,
            decimals: 0,
            ui_amount,
            market_cap: None,
            volume_24h: None,
            holder_count: None,
            price: None,
            price_change_24h: None,
        }
    }

    pub fn with_raw_balance(mut self, balance: u64, decimals: u8) -> Self {
        self.balance = balance;
        self.decimals = decimals;
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_market_cap(mut self, market_cap: Decimal) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    pub fn with_volume_24h(mut self, volume: Decimal) -> Self {
        self.volume_24h = Some(volume);
        self
    }

    pub fn with_holder_count(mut self, holders: u64) -> Self {
        self.holder_count = Some(holders);
        self
    }

    pub fn with_price_change_24h(mut self, change_percent: Decimal) -> Self {
        self.price_change_24h = Some(change_percent);
        self
    }

    /// USD value of the holding; a missing price counts as zero.
    ///
    /// Fails with [`AnalyzerError::InvalidInput`] when the product leaves the Decimal range.
    pub fn value(&self) -> Result<Decimal> {
        self.price
            .unwrap_or(Decimal::ZERO)
            .checked_mul(self.ui_amount)
            .ok_or_else(|| {
                AnalyzerError::InvalidInput(format!("value of {} ({}) is out of range", self.symbol, self.mint))
            })
    }
}

/// Trust and verification data for a mint (Shield data)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustRecord {
    pub mint: String,

    /// Flagged as malicious or suspicious
    pub flagged: bool,

    /// Verified by the trust provider
    pub is_verified: bool,

    /// Provider risk score (0 = safest, 100 = riskiest)
    pub risk_score: f64,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl TrustRecord {
    /// Neutral "unknown risk" record used whenever the lookup has nothing usable
    pub const FALLBACK_RISK_SCORE: f64 = 50.0;

    pub fn fallback(mint: impl Into<String>) -> Self {
        Self {
            mint: mint.into(),
            flagged: false,
            is_verified: false,
            risk_score: Self::FALLBACK_RISK_SCORE,
            tags: Vec::new(),
        }
    }
}

/// Closed set of token categories
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TokenCategory {
    Meme,
    Utility,
    DeFi,
    Gaming,
    #[serde(rename = "NFT")]
    Nft,
    Scam,
    Rug,
    Unknown,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 8] = [
        TokenCategory::Meme,
        TokenCategory::Utility,
        TokenCategory::DeFi,
        TokenCategory::Gaming,
        TokenCategory::Nft,
        TokenCategory::Scam,
        TokenCategory::Rug,
        TokenCategory::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Meme => "Meme",
            TokenCategory::Utility => "Utility",
            TokenCategory::DeFi => "DeFi",
            TokenCategory::Gaming => "Gaming",
            TokenCategory::Nft => "NFT",
            TokenCategory::Scam => "Scam",
            TokenCategory::Rug => "Rug",
            TokenCategory::Unknown => "Unknown",
        }
    }

    /// Scam or rug pull
    pub fn is_fraudulent(&self) -> bool {
        matches!(self, TokenCategory::Scam | TokenCategory::Rug)
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category assigned to a token by the classifier
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: TokenCategory,

    /// Confidence in the category (0.0 - 1.0)
    pub confidence: f64,

    /// Why the category was chosen
    #[serde(rename = "aiReasoning")]
    pub reasoning: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    RiskIncrease,
    NewToken,
    PriceDrop,
    VolumeSpike,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A risk-worthy condition found on a single token
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Deterministic id: `{mint}-{condition}`
    pub id: String,

    #[serde(rename = "type")]
    pub kind: AlertKind,

    pub message: String,

    pub severity: Severity,

    pub timestamp: DateTime<Utc>,
}

/// A token after trust lookup, classification and alert generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedToken {
    #[serde(flatten)]
    pub balance: TokenBalance,

    #[serde(default, rename = "shieldData", skip_serializing_if = "Option::is_none")]
    pub trust: Option<TrustRecord>,

    pub risk_level: RiskLevel,

    pub risk_label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,

    #[serde(default)]
    pub alerts: Vec<Alert>,
}

impl AnalyzedToken {
    /// Category of the token, `Unknown` when it was never classified
    pub fn category(&self) -> TokenCategory {
        self.classification
            .as_ref()
            .map_or(TokenCategory::Unknown, |c| c.category)
    }

    pub fn value(&self) -> Result<Decimal> {
        self.balance.value()
    }
}

/// Token counts per risk level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl RiskDistribution {
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }

    /// Share of `level` as a percentage of all tokens
    pub fn percent(&self, level: RiskLevel) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let count = match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        };
        count as f64 / total as f64 * 100.0
    }
}

impl<'a> FromIterator<&'a AnalyzedToken> for RiskDistribution {
    fn from_iter<I: IntoIterator<Item = &'a AnalyzedToken>>(iter: I) -> Self {
        let mut distribution = Self::default();
        for token in iter {
            distribution.record(token.risk_level);
        }
        distribution
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallLabel {
    Investor,
    Normie,
    Degen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Gamified badge derived from a portfolio analysis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub rarity: BadgeRarity,

    /// Time of the computation that produced the badge
    pub unlocked_at: DateTime<Utc>,
}

/// Portfolio-wide statistics, scores and label
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalysis {
    pub total_tokens: usize,

    /// Sum of price * amount across all tokens
    pub total_value: Decimal,

    pub risk_distribution: RiskDistribution,

    pub category_distribution: BTreeMap<TokenCategory, usize>,

    pub overall_label: OverallLabel,

    pub badge: Badge,

    pub emoji: String,

    pub description: String,

    /// Level-weighted risk score (0 - 100)
    pub risk_score: u8,

    /// Category coverage score (0 - 100)
    pub diversification_score: f64,
}

/// Full analysis of one wallet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAnalysis {
    pub address: String,

    pub tokens: Vec<AnalyzedToken>,

    pub analysis: PortfolioAnalysis,

    /// Value-weighted risk score (0 - 100)
    pub advanced_risk_score: f64,

    /// Alerts of all tokens, in token order
    pub alerts: Vec<Alert>,

    pub badges: Vec<Badge>,

    pub last_updated: DateTime<Utc>,
}

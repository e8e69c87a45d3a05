//! # wallet-analyzer
//!
//! Portfolio analyzer for blockchain wallets: enriches token balances with
//! trust data, classifies each token, scores its risk and rolls everything
//! up into a portfolio risk score, a diversification score and a badge.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────────────────┐
//! │ TokenBalance │──▶│ TrustLookup  │──▶│ analyze_token                │
//! │   (input)    │   │ (Shield API) │   │  risk level → classify →     │
//! └──────────────┘   └──────────────┘   │  alerts                      │
//!                                       └──────────────┬───────────────┘
//!                                                      ▼
//!                      ┌──────────────────────┐   ┌────────────────────┐
//!                      │ advanced risk score  │◀──│ analyze_portfolio  │
//!                      │ (value-weighted)     │   │ label + badge      │
//!                      └──────────────────────┘   └────────────────────┘
//! ```
//!
//! Only the trust lookup is asynchronous. A failed lookup never fails the
//! analysis: the token is scored with a neutral fallback record instead.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wallet_analyzer::{shield::ShieldClient, WalletAnalyzer};
//!
//! let analyzer = WalletAnalyzer::new(Arc::new(ShieldClient::from_env()?));
//! let wallet = analyzer.analyze(address, balances).await?;
//! println!("{} {:?}", wallet.analysis.emoji, wallet.analysis.overall_label);
//! ```

pub mod svckit;
pub mod scoring;
pub mod shield;
pub mod model;
pub mod error;

pub use error::{AnalyzerError, Result};
pub use model::{
    Alert, AlertKind, AnalyzedToken, Badge, BadgeRarity, Classification, OverallLabel,
    PortfolioAnalysis, RiskDistribution, RiskLevel, Severity, TokenBalance, TokenCategory,
    TrustRecord, WalletAnalysis,
};
pub use scoring::{
    analyze_portfolio, analyze_token, calculate_advanced_risk_score, classify_token, generate_alerts,
};
pub use shield::TrustLookup;
pub use svckit::{compare_wallets, WalletAnalyzer, WalletComparison};

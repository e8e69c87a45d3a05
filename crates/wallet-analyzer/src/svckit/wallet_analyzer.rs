//! Wallet Analyzer
//!
//! End-to-end pipeline for one wallet: trust lookups for every token,
//! per-token evaluation, portfolio aggregation and the advanced score.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{AnalyzerError, Result};
use crate::model::{TokenBalance, TrustRecord, WalletAnalysis};
use crate::scoring::{analyze_portfolio_at, analyze_tokens, calculate_advanced_risk_score};
use crate::shield::TrustLookup;

/// Analyzes wallets against a trust provider
pub struct WalletAnalyzer {
    lookup: Arc<dyn TrustLookup>,
}

impl WalletAnalyzer {
    pub fn new(lookup: Arc<dyn TrustLookup>) -> Self {
        Self { lookup }
    }

    /// The trust provider in use
    pub fn lookup(&self) -> &dyn TrustLookup {
        self.lookup.as_ref()
    }

    /// Analyze a wallet, fetching trust data for all tokens concurrently.
    ///
    /// Lookup failures degrade per token to the fallback record.
    pub async fn analyze(&self, address: &str, balances: Vec<TokenBalance>) -> Result<WalletAnalysis> {
        if balances.is_empty() {
            return Err(AnalyzerError::EmptyPortfolio);
        }

        let mints: Vec<&str> = balances.iter().map(|b| b.mint.as_str()).collect();
        tracing::debug!(address, tokens = mints.len(), provider = self.lookup.name(), "Fetching trust data");
        let records = self.lookup.trust_records(&mints).await;

        analyze_wallet_with_records(address, balances, records.into_iter().map(Some).collect())
    }

    /// Analyze a wallet with a caller-supplied trust batch; no lookups are made
    pub fn analyze_with_records(
        &self,
        address: &str,
        balances: Vec<TokenBalance>,
        trust: Vec<Option<TrustRecord>>,
    ) -> Result<WalletAnalysis> {
        analyze_wallet_with_records(address, balances, trust)
    }
}

/// Analyze a wallet with a caller-supplied trust batch aligned by index
pub fn analyze_wallet_with_records(
    address: &str,
    balances: Vec<TokenBalance>,
    trust: Vec<Option<TrustRecord>>,
) -> Result<WalletAnalysis> {
    if balances.is_empty() {
        return Err(AnalyzerError::EmptyPortfolio);
    }

    let now = Utc::now();
    let tokens = analyze_tokens(balances, trust)?;
    let analysis = analyze_portfolio_at(&tokens, now)?;
    let advanced_risk_score = calculate_advanced_risk_score(&tokens);

    let alerts = tokens
        .iter()
        .flat_map(|token| token.alerts.iter().cloned())
        .collect::<Vec<_>>();

    tracing::info!(
        address,
        tokens = tokens.len(),
        risk_score = analysis.risk_score,
        advanced_risk_score,
        label = ?analysis.overall_label,
        alerts = alerts.len(),
        "Wallet analyzed"
    );

    Ok(WalletAnalysis {
        address: address.to_string(),
        badges: vec![analysis.badge.clone()],
        tokens,
        analysis,
        advanced_risk_score,
        alerts,
        last_updated: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use crate::model::{OverallLabel, RiskLevel, TokenCategory};
    use crate::shield::{MockShieldClient, BONK_MINT, USDC_MINT};

    /// Provider that is always down
    struct DownLookup;

    #[async_trait]
    impl TrustLookup for DownLookup {
        async fn lookup(&self, mint: &str) -> Result<TrustRecord> {
            Err(AnalyzerError::TrustLookup(format!("timeout for {}", mint)))
        }

        async fn health_check(&self) -> bool {
            false
        }

        fn name(&self) -> &str {
            "Down"
        }
    }

    fn flagged_shield() -> MockShieldClient {
        MockShieldClient::with_defaults().with_record(TrustRecord {
            mint: "RUGmint".into(),
            flagged: true,
            is_verified: false,
            risk_score: 99.0,
            tags: vec!["honeypot".into()],
        })
    }

    #[tokio::test]
    async fn test_empty_wallet() {
        let analyzer = WalletAnalyzer::new(Arc::new(MockShieldClient::new()));
        let result = analyzer.analyze("wallet", Vec::new()).await;
        assert!(matches!(result, Err(AnalyzerError::EmptyPortfolio)));
    }

    #[tokio::test]
    async fn test_analyze_wallet() {
        let analyzer = WalletAnalyzer::new(Arc::new(flagged_shield()));
        let balances = vec![
            TokenBalance::new(USDC_MINT, "USDC", dec!(250)).with_price(dec!(1)),
            TokenBalance::new("RUGmint", "RUGGY", dec!(1000))
                .with_price(dec!(0.01))
                .with_holder_count(40),
            TokenBalance::new(BONK_MINT, "BONK", dec!(1000000)).with_price(dec!(0.00002)),
            TokenBalance::new("unlisted", "NEWTKN", dec!(3)),
        ];

        let wallet = analyzer.analyze("wallet-1", balances).await.unwrap();

        assert_eq!(wallet.address, "wallet-1");
        assert_eq!(wallet.tokens.len(), 4);
        assert_eq!(wallet.tokens[0].risk_label, "Verified");
        assert_eq!(wallet.tokens[1].risk_label, "Flagged");
        assert_eq!(wallet.tokens[2].risk_label, "Medium Risk");
        // unlisted mint got the fallback record, not an absent one
        assert_eq!(wallet.tokens[3].risk_label, "Medium Risk");
        assert_eq!(wallet.tokens[3].trust, Some(TrustRecord::fallback("unlisted")));

        assert_eq!(wallet.analysis.total_value, dec!(280));
        assert_eq!(wallet.analysis.risk_distribution.low, 1);
        assert_eq!(wallet.analysis.risk_distribution.high, 1);
        assert_eq!(wallet.analysis.overall_label, OverallLabel::Normie);

        let alert_ids: Vec<&str> = wallet.alerts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(alert_ids, ["RUGmint-flagged", "RUGmint-scam"]);
        assert_eq!(wallet.badges, vec![wallet.analysis.badge.clone()]);
        assert!((0.0..=100.0).contains(&wallet.advanced_risk_score));
    }

    #[tokio::test]
    async fn test_provider_outage_degrades_every_token() {
        let analyzer = WalletAnalyzer::new(Arc::new(DownLookup));
        let balances = vec![
            TokenBalance::new("A", "AAA", dec!(1)),
            TokenBalance::new("B", "BBB", dec!(1)),
        ];

        let wallet = analyzer.analyze("wallet-2", balances).await.unwrap();
        for token in &wallet.tokens {
            assert_eq!(token.risk_level, RiskLevel::Medium);
            assert_eq!(token.trust.as_ref().map(|t| t.risk_score), Some(50.0));
        }
        assert_eq!(wallet.analysis.risk_score, 50);
    }

    #[test]
    fn test_single_token_scenario() {
        let balances = vec![TokenBalance::new("X", "DOGECOIN", dec!(100)).with_price(dec!(1))];
        let trust = vec![Some(TrustRecord::fallback("X"))];

        let wallet = analyze_wallet_with_records("wallet-3", balances, trust).unwrap();
        let token = &wallet.tokens[0];

        assert_eq!(token.category(), TokenCategory::Meme);
        assert_eq!(token.risk_label, "Medium Risk");
        assert!(wallet.alerts.is_empty());
        assert_eq!(wallet.analysis.risk_score, 50);
        assert!((wallet.analysis.diversification_score - 12.5).abs() < f64::EPSILON);
        assert_eq!(wallet.analysis.overall_label, OverallLabel::Normie);
        // weight 100, meme: 50 + 20
        assert!((wallet.advanced_risk_score - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_supplied_records_skip_lookup() {
        let analyzer = WalletAnalyzer::new(Arc::new(DownLookup));
        let balances = vec![TokenBalance::new(USDC_MINT, "USDC", dec!(5)).with_price(dec!(1))];
        let trust = vec![Some(TrustRecord {
            is_verified: true,
            ..TrustRecord::fallback(USDC_MINT)
        })];

        let wallet = analyzer.analyze_with_records("wallet-5", balances, trust).unwrap();
        assert_eq!(wallet.tokens[0].risk_label, "Verified");
        assert_eq!(wallet.analysis.overall_label, OverallLabel::Investor);
    }

    #[test]
    fn test_misaligned_trust_batch() {
        let balances = vec![TokenBalance::new("X", "XXX", dec!(1))];
        let result = analyze_wallet_with_records("wallet-4", balances, vec![None, None]);
        assert!(matches!(result, Err(AnalyzerError::InvalidInput(_))));
    }
}

//! Mock Shield Client
//!
//! For testing and demo purposes. Serves trust records from a static table.

use std::collections::HashMap;

use async_trait::async_trait;

use super::TrustLookup;
use crate::error::{AnalyzerError, Result};
use crate::model::TrustRecord;

/// Well-known mints served by [`MockShieldClient::with_defaults`]
pub const WSOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const BONK_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

/// Mock trust provider with static records
#[derive(Default)]
pub struct MockShieldClient {
    records: HashMap<String, TrustRecord>,
}

impl MockShieldClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated with a few well-known Solana mints
    pub fn with_defaults() -> Self {
        Self::new()
            .with_record(TrustRecord {
                mint: WSOL_MINT.into(),
                flagged: false,
                is_verified: true,
                risk_score: 5.0,
                tags: vec!["verified".into(), "native".into()],
            })
            .with_record(TrustRecord {
                mint: USDC_MINT.into(),
                flagged: false,
                is_verified: true,
                risk_score: 3.0,
                tags: vec!["verified".into(), "stablecoin".into()],
            })
            .with_record(TrustRecord {
                mint: BONK_MINT.into(),
                flagged: false,
                is_verified: false,
                risk_score: 45.0,
                tags: vec!["community".into()],
            })
    }

    /// Add or replace the record for its mint
    pub fn with_record(mut self, record: TrustRecord) -> Self {
        self.records.insert(record.mint.clone(), record);
        self
    }
}

#[async_trait]
impl TrustLookup for MockShieldClient {
    async fn lookup(&self, mint: &str) -> Result<TrustRecord> {
        self.records
            .get(mint)
            .cloned()
            .ok_or_else(|| AnalyzerError::TrustUnavailable(mint.to_string()))
    }

    async fn health_check(&self) -> bool {
        true // Mock always healthy
    }

    fn name(&self) -> &str {
        "MockShield"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_mint() {
        let shield = MockShieldClient::with_defaults();

        let usdc = shield.lookup(USDC_MINT).await.unwrap();
        assert!(usdc.is_verified);
        assert!(!usdc.flagged);
    }

    #[tokio::test]
    async fn test_unknown_mint_degrades_to_fallback() {
        let shield = MockShieldClient::with_defaults();

        assert!(shield.lookup("NOTREAL").await.is_err());

        let record = shield.trust_record("NOTREAL").await;
        assert_eq!(record, TrustRecord::fallback("NOTREAL"));
    }

    #[tokio::test]
    async fn test_batch_keeps_order_and_isolates_failures() {
        let shield = MockShieldClient::with_defaults();

        let records = shield
            .trust_records(&[BONK_MINT, "missing-mint", WSOL_MINT])
            .await;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].mint, BONK_MINT);
        assert!((records[0].risk_score - 45.0).abs() < f64::EPSILON);
        assert_eq!(records[1], TrustRecord::fallback("missing-mint"));
        assert!(records[2].is_verified);
    }
}

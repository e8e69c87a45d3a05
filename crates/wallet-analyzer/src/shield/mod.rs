//! Token Trust Lookup
//!
//! Abstractions and implementations for token verification providers.
//! A failed or missing lookup is "unknown risk" data, not an error: callers
//! going through [`TrustLookup::trust_record`] always get a record back.

mod client;
mod mock;

pub use client::{ShieldClient, ShieldConfig};
pub use mock::{MockShieldClient, BONK_MINT, USDC_MINT, WSOL_MINT};

use async_trait::async_trait;
use futures::future::join_all;

use crate::error::Result;
use crate::model::TrustRecord;

/// Trust lookup trait (Strategy pattern)
///
/// Implement this for each verification provider.
#[async_trait]
pub trait TrustLookup: Send + Sync {
    /// Fetch the trust record for a mint
    async fn lookup(&self, mint: &str) -> Result<TrustRecord>;

    /// Fetch the trust record for a mint, degrading any failure to the fallback record
    async fn trust_record(&self, mint: &str) -> TrustRecord {
        match self.lookup(mint).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(mint, provider = self.name(), "Trust lookup failed: {}", e);
                TrustRecord::fallback(mint)
            }
        }
    }

    /// Fetch trust records for many mints concurrently, aligned by index
    async fn trust_records(&self, mints: &[&str]) -> Vec<TrustRecord> {
        join_all(mints.iter().map(|mint| self.trust_record(mint))).await
    }

    /// Check if the provider is reachable
    async fn health_check(&self) -> bool;

    /// Provider name
    fn name(&self) -> &str;
}

//! Service Kit
//!
//! Wallet-level services built on the scoring core.

mod wallet_analyzer;
mod wallet_comparison;

pub use wallet_analyzer::{analyze_wallet_with_records, WalletAnalyzer};
pub use wallet_comparison::{compare_wallets, WalletComparison, WalletMetrics};

//! Application State

use std::sync::Arc;

use wallet_analyzer::WalletAnalyzer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Wallet pipeline bound to the configured trust provider
    pub analyzer: Arc<WalletAnalyzer>,
}

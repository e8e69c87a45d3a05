//! Wallet Comparison
//!
//! Side-by-side metrics for several analyzed wallets.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{OverallLabel, WalletAnalysis};

/// Headline metrics of one wallet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletMetrics {
    pub address: String,
    pub label: OverallLabel,
    pub risk_score: u8,
    pub total_value: Decimal,
    pub token_count: usize,
    pub diversification: f64,
}

impl From<&WalletAnalysis> for WalletMetrics {
    fn from(wallet: &WalletAnalysis) -> Self {
        Self {
            address: wallet.address.clone(),
            label: wallet.analysis.overall_label,
            risk_score: wallet.analysis.risk_score,
            total_value: wallet.analysis.total_value,
            token_count: wallet.analysis.total_tokens,
            diversification: wallet.analysis.diversification_score,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletComparison {
    /// One row per wallet, in input order
    pub wallets: Vec<WalletMetrics>,

    /// Address with the lowest risk score
    pub safest: Option<String>,

    /// Address with the highest diversification score
    pub most_diversified: Option<String>,

    /// Address with the highest total value
    pub highest_value: Option<String>,

    pub combined_value: Decimal,
}

/// Address of the best wallet under `better`; the earlier wallet wins ties
fn pick(
    wallets: &[WalletMetrics],
    better: impl Fn(&WalletMetrics, &WalletMetrics) -> bool,
) -> Option<String> {
    wallets
        .iter()
        .reduce(|best, w| if better(w, best) { w } else { best })
        .map(|w| w.address.clone())
}

/// Compare analyzed wallets. Ties go to the wallet listed first.
///
/// `combined_value` saturates at `Decimal::MAX`.
pub fn compare_wallets(analyses: &[WalletAnalysis]) -> WalletComparison {
    let wallets: Vec<WalletMetrics> = analyses.iter().map(WalletMetrics::from).collect();

    let safest = pick(&wallets, |a, b| a.risk_score < b.risk_score);
    let most_diversified = pick(&wallets, |a, b| a.diversification > b.diversification);
    let highest_value = pick(&wallets, |a, b| a.total_value > b.total_value);
    let combined_value = wallets
        .iter()
        .fold(Decimal::ZERO, |total, w| total.saturating_add(w.total_value));

    WalletComparison {
        wallets,
        safest,
        most_diversified,
        highest_value,
        combined_value,
    }
}

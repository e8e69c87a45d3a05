//! Scoring
//!
//! Classification, per-token risk, alerts and portfolio aggregation.
//! Everything here is pure and synchronous.

pub mod classifier;
pub mod evaluator;
pub mod alerts;
pub mod aggregator;
pub mod advanced;

pub use classifier::{classify_token, MarketMetrics};
pub use evaluator::{analyze_token, analyze_tokens, assess_risk};
pub use alerts::{generate_alerts, generate_alerts_at};
pub use aggregator::{
    analyze_portfolio, analyze_portfolio_at, apply_diversification_override, diversification_score,
    risk_score, select_label, LabelSelection,
};
pub use advanced::{calculate_advanced_risk_score, token_risk};

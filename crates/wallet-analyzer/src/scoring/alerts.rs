//! Alert Generator
//!
//! Inspects one token and produces alerts for risk-worthy conditions.
//! Checks run in a fixed order (flagged, scam/rug, price drop, volume
//! spike) and are independent, so a token yields zero to four alerts.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::model::{Alert, AlertKind, Classification, Severity, TokenBalance, TrustRecord};

const PRICE_DROP_THRESHOLD: Decimal = dec!(-50);
const VOLUME_SPIKE_THRESHOLD: Decimal = dec!(10000000);

/// Generate alerts for a token, timestamped now
pub fn generate_alerts(
    token: &TokenBalance,
    trust: Option<&TrustRecord>,
    classification: &Classification,
) -> Vec<Alert> {
    generate_alerts_at(token, trust, classification, Utc::now())
}

/// Generate alerts for a token with an explicit timestamp
pub fn generate_alerts_at(
    token: &TokenBalance,
    trust: Option<&TrustRecord>,
    classification: &Classification,
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let alert = |suffix: &str, kind: AlertKind, severity: Severity, message: String| Alert {
        id: format!("{}-{}", token.mint, suffix),
        kind,
        message,
        severity,
        timestamp: now,
    };

    let mut alerts = Vec::new();

    if trust.is_some_and(|t| t.flagged) {
        alerts.push(alert(
            "flagged",
            AlertKind::RiskIncrease,
            Severity::High,
            format!("{} has been flagged by Shield API", token.symbol),
        ));
    }

    if classification.category.is_fraudulent() {
        alerts.push(alert(
            "scam",
            AlertKind::RiskIncrease,
            Severity::High,
            format!(
                "{} classified as potential {}",
                token.symbol,
                classification.category.as_str().to_lowercase()
            ),
        ));
    }

    if let Some(change) = token.price_change_24h.filter(|c| *c < PRICE_DROP_THRESHOLD) {
        let mut dropped = change
            .abs()
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        dropped.rescale(1);
        alerts.push(alert(
            "price-drop",
            AlertKind::PriceDrop,
            Severity::Medium,
            format!("{} dropped {}% in 24h", token.symbol, dropped),
        ));
    }

    if token.volume_24h.is_some_and(|v| v > VOLUME_SPIKE_THRESHOLD) {
        alerts.push(alert(
            "volume-spike",
            AlertKind::VolumeSpike,
            Severity::Low,
            format!("{} experiencing high trading volume", token.symbol),
        ));
    }

    alerts
}

//! Token Classifier
//!
//! Assigns a category to a token from its symbol and market metrics.
//!
//! Rules are evaluated top to bottom and the first match wins, so a
//! "DOGE"-named token with a billion-dollar market cap is still a meme.
//! Reordering [`RULES`] changes outcomes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::model::{Classification, TokenBalance, TokenCategory};

/// Market metrics the classifier looks at
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarketMetrics {
    pub market_cap: Option<Decimal>,
    pub volume_24h: Option<Decimal>,
    pub holder_count: Option<u64>,
}

impl From<&TokenBalance> for MarketMetrics {
    fn from(token: &TokenBalance) -> Self {
        Self {
            market_cap: token.market_cap,
            volume_24h: token.volume_24h,
            holder_count: token.holder_count,
        }
    }
}

const MEME_MARKERS: [&str; 3] = ["doge", "shib", "pepe"];
const UTILITY_MIN_MARKET_CAP: Decimal = dec!(1000000000);
const RUG_MAX_HOLDERS: u64 = 100;
const SCAM_MAX_VOLUME: Decimal = dec!(1000);

struct ClassificationRule {
    category: TokenCategory,
    confidence: f64,
    reasoning: &'static str,
    matches: fn(&str, &MarketMetrics) -> bool,
}

static RULES: [ClassificationRule; 4] = [
    ClassificationRule {
        category: TokenCategory::Meme,
        confidence: 0.8,
        reasoning: "Token name suggests meme token characteristics",
        matches: |symbol, _| {
            let symbol = symbol.to_lowercase();
            MEME_MARKERS.iter().any(|marker| symbol.contains(marker))
        },
    },
    ClassificationRule {
        category: TokenCategory::Utility,
        confidence: 0.7,
        reasoning: "High market cap suggests established utility token",
        matches: |_, metrics| metrics.market_cap.is_some_and(|cap| cap > UTILITY_MIN_MARKET_CAP),
    },
    ClassificationRule {
        category: TokenCategory::Rug,
        confidence: 0.6,
        reasoning: "Very low holder count raises rug pull concerns",
        matches: |_, metrics| metrics.holder_count.is_some_and(|holders| holders < RUG_MAX_HOLDERS),
    },
    ClassificationRule {
        category: TokenCategory::Scam,
        confidence: 0.5,
        reasoning: "Extremely low trading volume is suspicious",
        matches: |_, metrics| metrics.volume_24h.is_some_and(|volume| volume < SCAM_MAX_VOLUME),
    },
];

const DEFAULT_CONFIDENCE: f64 = 0.5;
const DEFAULT_REASONING: &str = "Classification based on token characteristics";

/// Classify a token; falls back to `Unknown` when no rule matches
pub fn classify_token(symbol: &str, metrics: &MarketMetrics) -> Classification {
    RULES
        .iter()
        .find(|rule| (rule.matches)(symbol, metrics))
        .map_or_else(
            || Classification {
                category: TokenCategory::Unknown,
                confidence: DEFAULT_CONFIDENCE,
                reasoning: DEFAULT_REASONING.into(),
            },
            |rule| Classification {
                category: rule.category,
                confidence: rule.confidence,
                reasoning: rule.reasoning.into(),
            },
        )
}

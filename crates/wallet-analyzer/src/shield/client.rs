//! Shield API Client
//!
//! `TrustLookup` backed by the Shield token verification HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use super::TrustLookup;
use crate::error::{AnalyzerError, Result};
use crate::model::TrustRecord;

/// Shield client configuration
#[derive(Clone, Debug)]
pub struct ShieldConfig {
    /// Shield API base URL
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self {
            base_url: "https://shield.jup.ag".into(),
            timeout_secs: 10,
        }
    }
}

impl ShieldConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = std::env::var("SHIELD_API_BASE").unwrap_or(defaults.base_url);
        let timeout_secs = std::env::var("SHIELD_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        Self {
            base_url,
            timeout_secs,
        }
    }
}

/// Raw Shield payload; every field may be missing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShieldResponse {
    #[serde(default)]
    flagged: Option<bool>,
    #[serde(default)]
    is_verified: Option<bool>,
    #[serde(default)]
    risk_score: Option<f64>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl ShieldResponse {
    fn into_record(self, mint: &str) -> TrustRecord {
        let risk_score = self
            .risk_score
            .filter(|score| score.is_finite())
            .map_or(TrustRecord::FALLBACK_RISK_SCORE, |score| score.clamp(0.0, 100.0));

        TrustRecord {
            mint: mint.to_string(),
            flagged: self.flagged.unwrap_or(false),
            is_verified: self.is_verified.unwrap_or(false),
            risk_score,
            tags: self.tags.unwrap_or_default(),
        }
    }
}

fn parse_shield_response(mint: &str, body: &str) -> Result<TrustRecord> {
    let response: ShieldResponse = serde_json::from_str(body)?;
    Ok(response.into_record(mint))
}

/// Shield HTTP client
pub struct ShieldClient {
    http: reqwest::Client,
    base: Url,
    config: ShieldConfig,
}

impl ShieldClient {
    /// Create from configuration; the base URL must be an http(s)-style URL with a path
    pub fn from_config(config: ShieldConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| AnalyzerError::Config(format!("Invalid Shield base URL '{}': {}", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(AnalyzerError::Config(format!(
                "Shield base URL '{}' cannot hold a path",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalyzerError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(ShieldConfig::from_env())
    }

    pub fn config(&self) -> &ShieldConfig {
        &self.config
    }

    /// `{base}/token/{mint}` with the mint escaped as a single path segment
    fn token_url(&self, mint: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("token").push(mint);
        }
        url
    }
}

#[async_trait]
impl TrustLookup for ShieldClient {
    async fn lookup(&self, mint: &str) -> Result<TrustRecord> {
        let url = self.token_url(mint);
        tracing::debug!(%url, "Fetching Shield data");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        // Not listed is a normal answer: the token is simply unknown
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(mint, "Token not found in Shield");
            return Ok(TrustRecord::fallback(mint));
        }

        if !status.is_success() {
            return Err(AnalyzerError::TrustLookup(format!("Shield API error: {}", status)));
        }

        let body = response.text().await?;
        parse_shield_response(mint, &body)
    }

    /// Reachable and not failing server-side; a 404 on the root still counts as up
    async fn health_check(&self) -> bool {
        match self.http.get(self.base.clone()).send().await {
            Ok(response) => !response.status().is_server_error(),
            Err(_) => false,
        }
    }

    fn name(&self) -> &str {
        "Shield"
    }
}

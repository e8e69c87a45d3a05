//! HTTP Handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use wallet_analyzer::{
    analyze_portfolio, analyze_token, calculate_advanced_risk_score, compare_wallets,
    AnalyzedToken, AnalyzerError, PortfolioAnalysis, TokenBalance, TrustRecord, WalletAnalysis,
    WalletComparison,
};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub trust_provider: String,
    pub trust_provider_healthy: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    pub token: TokenBalance,
    #[serde(default)]
    pub shield_data: Option<TrustRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub address: String,
    pub tokens: Vec<TokenBalance>,
    /// Trust records aligned with `tokens`; looked up when omitted
    #[serde(default)]
    pub shield_data: Option<Vec<Option<TrustRecord>>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis_id: String,
    #[serde(flatten)]
    pub wallet: WalletAnalysis,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedRiskResponse {
    pub risk_score: f64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(err: &AnalyzerError) -> ApiError {
    let status = match err {
        AnalyzerError::EmptyPortfolio => StatusCode::UNPROCESSABLE_ENTITY,
        AnalyzerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.user_message(),
            code: err.code().into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let lookup = state.analyzer.lookup();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        trust_provider: lookup.name().to_string(),
        trust_provider_healthy: lookup.health_check().await,
    })
}

/// Analyze a single token against an optional trust record
pub async fn token_handler(Json(payload): Json<TokenRequest>) -> Json<AnalyzedToken> {
    Json(analyze_token(payload.token, payload.shield_data))
}

/// Full wallet analysis
pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let analysis_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(
        %analysis_id,
        address = %payload.address,
        tokens = payload.tokens.len(),
        supplied_trust = payload.shield_data.is_some(),
        "Analyzing wallet"
    );

    let result = match payload.shield_data {
        Some(records) => state.analyzer.analyze_with_records(&payload.address, payload.tokens, records),
        None => state.analyzer.analyze(&payload.address, payload.tokens).await,
    };

    let wallet = result.map_err(|e| {
        tracing::warn!(%analysis_id, "Wallet analysis rejected: {}", e);
        api_error(&e)
    })?;

    Ok(Json(AnalyzeResponse { analysis_id, wallet }))
}

/// Aggregate already analyzed tokens
pub async fn portfolio_handler(
    Json(tokens): Json<Vec<AnalyzedToken>>,
) -> Result<Json<PortfolioAnalysis>, ApiError> {
    analyze_portfolio(&tokens)
        .map(Json)
        .map_err(|e| api_error(&e))
}

/// Value-weighted risk score of already analyzed tokens
pub async fn advanced_risk_handler(Json(tokens): Json<Vec<AnalyzedToken>>) -> Json<AdvancedRiskResponse> {
    Json(AdvancedRiskResponse {
        risk_score: calculate_advanced_risk_score(&tokens),
    })
}

/// Compare several wallet analyses
pub async fn compare_handler(Json(wallets): Json<Vec<WalletAnalysis>>) -> Json<WalletComparison> {
    Json(compare_wallets(&wallets))
}

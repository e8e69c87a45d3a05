//! wallet-analyzer HTTP Server
//!
//! Axum-based server exposing the portfolio analyzer as a JSON API.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wallet_analyzer::{
    shield::{MockShieldClient, ShieldClient},
    TrustLookup, WalletAnalyzer,
};

use crate::handlers::{
    advanced_risk_handler, analyze_handler, compare_handler, health_check, portfolio_handler,
    token_handler,
};
use crate::state::AppState;

/// Pick the trust provider from `TRUST_LOOKUP` (`shield` or `mock`)
fn trust_lookup_from_env() -> anyhow::Result<Arc<dyn TrustLookup>> {
    let kind = std::env::var("TRUST_LOOKUP").unwrap_or_else(|_| "shield".into());

    let lookup: Arc<dyn TrustLookup> = match kind.as_str() {
        "mock" => Arc::new(MockShieldClient::with_defaults()),
        "shield" => {
            let client = ShieldClient::from_env()?;
            tracing::info!("Shield API at {}", client.config().base_url);
            Arc::new(client)
        }
        other => anyhow::bail!("Unknown TRUST_LOOKUP '{}' (expected 'shield' or 'mock')", other),
    };

    Ok(lookup)
}

fn app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/token", post(token_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/portfolio", post(portfolio_handler))
        .route("/api/risk/advanced", post(advanced_risk_handler))
        .route("/api/compare", post(compare_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let lookup = trust_lookup_from_env()?;
    if lookup.health_check().await {
        tracing::info!("✓ Trust provider '{}' reachable", lookup.name());
    } else {
        tracing::warn!("⚠ Trust provider '{}' not reachable", lookup.name());
        tracing::warn!("  Tokens will be scored with fallback trust data");
    }

    let state = AppState {
        analyzer: Arc::new(WalletAnalyzer::new(lookup)),
    };

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("wallet-analyzer server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health            - Health check");
    tracing::info!("  POST /api/token         - Analyze one token");
    tracing::info!("  POST /api/analyze       - Analyze a wallet");
    tracing::info!("  POST /api/portfolio     - Aggregate analyzed tokens");
    tracing::info!("  POST /api/risk/advanced - Value-weighted risk score");
    tracing::info!("  POST /api/compare       - Compare wallet analyses");

    axum::serve(listener, app(state)).await?;

    Ok(())
}

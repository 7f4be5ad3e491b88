/// Axum HTTP server setup and routing

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::*;
use crate::state::MockLedger;

pub fn create_router(ledger: MockLedger) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Explorer balance lookups (with and without trailing slash)
        .route("/insight-api/addr/:address", get(get_address_balance))
        .route("/insight-api/addr/:address/", get(get_address_balance))

        // Core node wallet
        .route("/v1/wallet/payment_address", get(get_payment_address))
        .route("/v1/wallet/balance", get(get_wallet_balance))
        .route("/v1/wallet/tx", post(withdraw))

        // Backup email service
        .route("/backup", post(backup))

        // Shared state
        .with_state(ledger)

        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(ledger: MockLedger, host: String, port: u16) -> anyhow::Result<()> {
    let app = create_router(ledger);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("Core API mock listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Serve on an ephemeral localhost port in the background
pub async fn spawn_server(ledger: MockLedger) -> anyhow::Result<SocketAddr> {
    let app = create_router(ledger);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            log::error!("Core API mock stopped: {}", e);
        }
    });

    log::debug!("Core API mock spawned on http://{}", addr);
    Ok(addr)
}

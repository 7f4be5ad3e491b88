/// Axum HTTP handlers for the mocked endpoints

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::state::MockLedger;
use crate::types::*;

/// Shared application state
pub type AppState = MockLedger;

/// Handler errors, rendered as `{"error": "..."}`
pub enum ApiError {
    Unauthorized,
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

fn authorize(ledger: &MockLedger, headers: &HeaderMap) -> Result<(), ApiError> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if ledger.is_authorized(header) {
        Ok(())
    } else {
        log::warn!("Rejected request with bad or missing authorization");
        Err(ApiError::Unauthorized)
    }
}

/// GET /insight-api/addr/{address}
pub async fn get_address_balance(
    State(ledger): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<AddressBalanceResponse>, ApiError> {
    let balance = ledger
        .address_balance(&address)
        .ok_or_else(|| ApiError::Internal(format!("lookup failed for {}", address)))?;
    Ok(Json(AddressBalanceResponse {
        addr_str: address,
        balance,
        balance_sat: btc_to_satoshis(balance),
    }))
}

/// GET /v1/wallet/payment_address
pub async fn get_payment_address(
    State(ledger): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PaymentAddressResponse>, ApiError> {
    authorize(&ledger, &headers)?;
    Ok(Json(PaymentAddressResponse {
        address: ledger.wallet_address(),
    }))
}

/// GET /v1/wallet/balance
pub async fn get_wallet_balance(
    State(ledger): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<WalletBalanceResponse>, ApiError> {
    authorize(&ledger, &headers)?;
    Ok(Json(WalletBalanceResponse {
        balance: WalletBalance {
            bitcoin: ledger.wallet_balance_btc(),
            satoshis: ledger.wallet_balance_sats(),
        },
    }))
}

/// POST /v1/wallet/tx
/// Returns `{}` on success, 400 with an `error` field on rejection
pub async fn withdraw(
    State(ledger): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<WithdrawalRequest>,
) -> Result<Json<Value>, ApiError> {
    authorize(&ledger, &headers)?;
    log::info!("Withdrawing {} sats to {}", req.amount, req.address);

    ledger
        .withdraw(&req.address, req.min_confs, req.amount)
        .map_err(ApiError::BadRequest)?;

    Ok(Json(json!({})))
}

/// POST /backup
pub async fn backup(
    State(ledger): State<AppState>,
    Json(req): Json<BackupRequest>,
) -> Result<StatusCode, ApiError> {
    if req.email.trim().is_empty() {
        return Err(ApiError::BadRequest("missing email".to_string()));
    }
    log::info!("Recorded keychain backup for {}", req.email);
    ledger.record_backup(&req.email, &req.encrypted_portal_key);
    Ok(StatusCode::OK)
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

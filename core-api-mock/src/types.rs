/// Wire types for the mocked endpoints
///
/// Field names follow the services the account actions talk to: the
/// insight-style explorer, the core node wallet API and the backup service.

use serde::{Deserialize, Serialize};

/// Response from /insight-api/addr/{address}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBalanceResponse {
    pub addr_str: String,
    pub balance: f64,
    pub balance_sat: u64,
}

/// Response from /v1/wallet/payment_address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAddressResponse {
    pub address: String,
}

/// Response from /v1/wallet/balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletBalanceResponse {
    pub balance: WalletBalance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletBalance {
    pub bitcoin: f64,
    pub satoshis: u64,
}

/// Body of POST /v1/wallet/tx
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub address: String,
    #[serde(default)]
    pub min_confs: u32,
    /// Amount in satoshis
    pub amount: u64,
}

/// Body of POST /backup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRequest {
    pub email: String,
    pub encrypted_portal_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub const SATOSHIS_PER_BITCOIN: u64 = 100_000_000;

pub fn satoshis_to_btc(sats: u64) -> f64 {
    sats as f64 / SATOSHIS_PER_BITCOIN as f64
}

pub fn btc_to_satoshis(btc: f64) -> u64 {
    (btc * SATOSHIS_PER_BITCOIN as f64).round() as u64
}

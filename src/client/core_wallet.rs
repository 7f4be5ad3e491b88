use bitcoin::Amount;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fetch::{authorization_header_value, Fetch};
use crate::error::AccountError;

#[derive(Debug, Deserialize)]
struct PaymentAddressResponse {
    address: String,
}

#[derive(Debug, Deserialize)]
struct WalletBalanceResponse {
    balance: WalletBalance,
}

#[derive(Debug, Deserialize)]
struct WalletBalance {
    bitcoin: f64,
}

/// Withdrawal request body sent to the core node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub address: String,
    pub min_confs: u32,
    /// Amount in satoshis
    pub amount: u64,
}

/// Convert a decimal BTC amount into satoshis, rounding to the nearest satoshi
pub fn btc_to_satoshis(amount: f64) -> Result<u64, AccountError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(AccountError::InvalidAmount(format!("{} BTC", amount)));
    }

    let sats = (amount * Amount::ONE_BTC.to_sat() as f64).round();
    if sats > Amount::MAX_MONEY.to_sat() as f64 {
        return Err(AccountError::InvalidAmount(format!(
            "{} BTC exceeds the maximum supply",
            amount
        )));
    }

    Ok(Amount::from_sat(sats as u64).to_sat())
}

/// Authenticated client for the core node wallet API
pub struct CoreWalletClient<'a, F: Fetch + ?Sized> {
    fetch: &'a F,
    authorization: String,
}

impl<'a, F: Fetch + ?Sized> CoreWalletClient<'a, F> {
    pub fn new(fetch: &'a F, core_api_password: &str) -> Self {
        Self {
            fetch,
            authorization: authorization_header_value(core_api_password),
        }
    }

    /// GET the wallet's receiving address
    pub async fn payment_address(&self, url: &str) -> Result<String, AccountError> {
        let response = self
            .fetch
            .get(url, Some(&self.authorization))
            .await?
            .error_for_status()?;
        let body: PaymentAddressResponse = response.json()?;
        Ok(body.address)
    }

    /// GET the wallet's balance in BTC
    pub async fn balance(&self, url: &str) -> Result<f64, AccountError> {
        let response = self
            .fetch
            .get(url, Some(&self.authorization))
            .await?
            .error_for_status()?;
        let body: WalletBalanceResponse = response.json()?;
        Ok(body.balance.bitcoin)
    }

    /// POST a withdrawal of `amount` BTC to `recipient_address`
    ///
    /// A JSON `error` field in the response is a backend rejection and maps to
    /// [`AccountError::WithdrawalRejected`] with the backend's message,
    /// whatever the HTTP status.
    pub async fn withdraw(
        &self,
        url: &str,
        recipient_address: &str,
        amount: f64,
    ) -> Result<(), AccountError> {
        let request = WithdrawalRequest {
            address: recipient_address.to_string(),
            min_confs: 0,
            amount: btc_to_satoshis(amount)?,
        };
        let body = serde_json::to_value(&request)?;

        let response = self
            .fetch
            .post_json(url, Some(&self.authorization), &body)
            .await?;

        match serde_json::from_str::<Value>(&response.body) {
            Ok(json) => {
                if let Some(error) = rejection_message(&json) {
                    return Err(AccountError::WithdrawalRejected(error));
                }
                response.error_for_status()?;
                Ok(())
            }
            Err(e) => {
                response.error_for_status()?;
                Err(AccountError::Json(e))
            }
        }
    }
}

/// Truthy `error` field of a withdrawal response
fn rejection_message(json: &Value) -> Option<String> {
    match json.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

//! Error types for account operations
//!
//! Validation errors (mnemonic, seed, keychain encoding) and transport errors
//! are returned to callers of the derivation and client layers. The reducer
//! never fails; orchestrations decide which of these reach the state tree.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Key derivation error: {0}")]
    Key(String),

    #[error("Invalid public keychain: {0}")]
    InvalidKeychain(String),

    #[error("Encryption error: {0}")]
    Crypto(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    WithdrawalRejected(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<bitcoin::bip32::Error> for AccountError {
    fn from(err: bitcoin::bip32::Error) -> Self {
        AccountError::Key(err.to_string())
    }
}

impl From<reqwest::Error> for AccountError {
    fn from(err: reqwest::Error) -> Self {
        AccountError::Transport(err.to_string())
    }
}

impl AccountError {
    /// Message recorded in the withdrawal sub-state.
    ///
    /// Backend rejections carry the backend's own text unchanged.
    pub fn withdrawal_message(&self) -> String {
        match self {
            AccountError::WithdrawalRejected(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_is_verbatim() {
        let err = AccountError::WithdrawalRejected("insufficient funds".into());
        assert_eq!(err.withdrawal_message(), "insufficient funds");
        assert_eq!(err.to_string(), "insufficient funds");
    }

    #[test]
    fn test_transport_message_is_prefixed() {
        let err = AccountError::Transport("connection refused".into());
        assert_eq!(err.withdrawal_message(), "Transport error: connection refused");
    }
}

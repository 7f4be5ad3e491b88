//! Account actions and their synchronous creators

use serde::{Deserialize, Serialize};

use super::state::BalanceMap;
use crate::error::AccountError;
use crate::keys::MasterKeychain;

/// Every state transition the account reducer understands
///
/// Wire form is `{"type": "CREATE_ACCOUNT", ...camelCase payload}`. Tags the
/// reducer does not know decode to [`Action::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    CreateAccount {
        encrypted_backup_phrase: String,
        identity_public_keychain: String,
        bitcoin_public_keychain: String,
        first_identity_address: String,
        first_bitcoin_address: String,
        first_identity_key: String,
        #[serde(rename = "firstIdentityKeyID")]
        first_identity_key_id: String,
    },
    DeleteAccount,
    NewIdentityAddress,
    NewBitcoinAddress,
    UpdateBackupPhrase {
        encrypted_backup_phrase: String,
    },
    UpdateBalances {
        balances: BalanceMap,
    },
    UpdateCoreAddress {
        core_wallet_address: String,
    },
    UpdateCoreBalance {
        core_wallet_balance: f64,
    },
    ResetCoreBalanceWithdrawal,
    WithdrawingCoreBalance {
        recipient_address: String,
    },
    WithdrawCoreBalanceSuccess,
    WithdrawCoreBalanceError {
        error: String,
    },
    PromptedForEmail,
    #[serde(other)]
    Unrecognized,
}

/// Derive the account's public material from `master` and wrap it with the
/// encrypted backup phrase
pub fn create_account(
    encrypted_backup_phrase: String,
    master: &MasterKeychain,
) -> Result<Action, AccountError> {
    let keys = master.account_keys()?;

    Ok(Action::CreateAccount {
        encrypted_backup_phrase,
        identity_public_keychain: keys.identity_public_keychain,
        bitcoin_public_keychain: keys.bitcoin_public_keychain,
        first_identity_address: keys.first_identity_address,
        first_bitcoin_address: keys.first_bitcoin_address,
        first_identity_key: keys.first_identity_key,
        first_identity_key_id: keys.first_identity_key_id,
    })
}

pub fn update_core_wallet_address(core_wallet_address: String) -> Action {
    Action::UpdateCoreAddress {
        core_wallet_address,
    }
}

pub fn update_core_wallet_balance(core_wallet_balance: f64) -> Action {
    Action::UpdateCoreBalance {
        core_wallet_balance,
    }
}

pub fn delete_account() -> Action {
    Action::DeleteAccount
}

pub fn update_backup_phrase(encrypted_backup_phrase: String) -> Action {
    Action::UpdateBackupPhrase {
        encrypted_backup_phrase,
    }
}

pub fn update_balances(balances: BalanceMap) -> Action {
    Action::UpdateBalances { balances }
}

pub fn reset_core_balance_withdrawal() -> Action {
    Action::ResetCoreBalanceWithdrawal
}

pub fn withdrawing_core_balance(recipient_address: String) -> Action {
    Action::WithdrawingCoreBalance { recipient_address }
}

pub fn withdraw_core_balance_success() -> Action {
    Action::WithdrawCoreBalanceSuccess
}

pub fn withdraw_core_balance_error(error: String) -> Action {
    Action::WithdrawCoreBalanceError { error }
}

pub fn prompted_for_email() -> Action {
    Action::PromptedForEmail
}

pub fn new_identity_address() -> Action {
    Action::NewIdentityAddress
}

pub fn new_bitcoin_address() -> Action {
    Action::NewBitcoinAddress
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_tags() {
        assert_eq!(
            serde_json::to_value(delete_account()).unwrap(),
            json!({"type": "DELETE_ACCOUNT"})
        );
        assert_eq!(
            serde_json::to_value(update_core_wallet_address("1core".into())).unwrap(),
            json!({"type": "UPDATE_CORE_ADDRESS", "coreWalletAddress": "1core"})
        );
        assert_eq!(
            serde_json::to_value(withdrawing_core_balance("1dest".into())).unwrap(),
            json!({"type": "WITHDRAWING_CORE_BALANCE", "recipientAddress": "1dest"})
        );
    }

    #[test]
    fn test_create_account_key_id_field() {
        let action = Action::CreateAccount {
            encrypted_backup_phrase: "00".into(),
            identity_public_keychain: "aa".into(),
            bitcoin_public_keychain: "bb".into(),
            first_identity_address: "1id".into(),
            first_bitcoin_address: "1btc".into(),
            first_identity_key: "cc".into(),
            first_identity_key_id: "dd".into(),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "CREATE_ACCOUNT");
        assert_eq!(value["firstIdentityKeyID"], "dd");
        assert_eq!(value["encryptedBackupPhrase"], "00");
    }

    #[test]
    fn test_unknown_tag_is_unrecognized() {
        let action: Action =
            serde_json::from_value(json!({"type": "SEARCH_PROFILES", "query": "x"})).unwrap();
        assert_eq!(action, Action::Unrecognized);
    }

    #[test]
    fn test_decode_known_action() {
        let action: Action = serde_json::from_value(json!({
            "type": "WITHDRAW_CORE_BALANCE_ERROR",
            "error": "insufficient funds"
        }))
        .unwrap();
        assert_eq!(action, withdraw_core_balance_error("insufficient funds".into()));
    }
}

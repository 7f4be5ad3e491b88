use std::sync::Arc;

use super::action::Action;
use super::state::{AccountState, BitcoinAccount, IdentityAccount, IdentityKeypair, Withdrawal};

/// Fold `action` into `state`
///
/// Returns the same `Arc` when nothing changes, so callers can detect a
/// no-op with `Arc::ptr_eq`. Never fails: an address derivation that cannot
/// proceed is logged and leaves the state as it was.
pub fn account_reducer(state: &Arc<AccountState>, action: &Action) -> Arc<AccountState> {
    match action {
        Action::CreateAccount {
            encrypted_backup_phrase,
            identity_public_keychain,
            bitcoin_public_keychain,
            first_identity_address,
            first_bitcoin_address,
            first_identity_key,
            first_identity_key_id,
        } => state.copy_with(|s| {
            s.account_created = true;
            s.encrypted_backup_phrase = Some(encrypted_backup_phrase.clone());
            s.identity_account = IdentityAccount {
                public_keychain: Some(identity_public_keychain.clone()),
                addresses: vec![first_identity_address.clone()],
                keypairs: vec![IdentityKeypair {
                    key: first_identity_key.clone(),
                    key_id: first_identity_key_id.clone(),
                    address: first_identity_address.clone(),
                }],
                address_index: 0,
            };
            s.bitcoin_account = BitcoinAccount {
                public_keychain: Some(bitcoin_public_keychain.clone()),
                addresses: vec![first_bitcoin_address.clone()],
                address_index: 0,
                balances: s.bitcoin_account.balances.clone(),
            };
        }),
        Action::DeleteAccount => state.copy_with(|s| {
            s.account_created = false;
            s.encrypted_backup_phrase = None;
        }),
        Action::UpdateCoreAddress {
            core_wallet_address,
        } => state.copy_with(|s| s.core_wallet.address = Some(core_wallet_address.clone())),
        Action::UpdateCoreBalance {
            core_wallet_balance,
        } => state.copy_with(|s| s.core_wallet.balance = *core_wallet_balance),
        Action::UpdateBackupPhrase {
            encrypted_backup_phrase,
        } => state.copy_with(|s| s.encrypted_backup_phrase = Some(encrypted_backup_phrase.clone())),
        Action::NewIdentityAddress => {
            let mut identity_account = state.identity_account.clone();
            match identity_account.derive_next_address() {
                Ok(()) => state.copy_with(|s| s.identity_account = identity_account),
                Err(e) => {
                    log::error!("NEW_IDENTITY_ADDRESS: {}", e);
                    Arc::clone(state)
                }
            }
        }
        Action::NewBitcoinAddress => {
            let mut bitcoin_account = state.bitcoin_account.clone();
            match bitcoin_account.derive_next_address() {
                Ok(()) => state.copy_with(|s| s.bitcoin_account = bitcoin_account),
                Err(e) => {
                    log::error!("NEW_BITCOIN_ADDRESS: {}", e);
                    Arc::clone(state)
                }
            }
        }
        Action::UpdateBalances { balances } => {
            state.copy_with(|s| s.bitcoin_account.balances = balances.clone())
        }
        Action::ResetCoreBalanceWithdrawal => {
            state.copy_with(|s| s.core_wallet.withdrawal = Withdrawal::idle())
        }
        Action::WithdrawingCoreBalance { recipient_address } => state.copy_with(|s| {
            s.core_wallet.withdrawal = Withdrawal::started(recipient_address.clone())
        }),
        Action::WithdrawCoreBalanceSuccess => {
            state.copy_with(|s| s.core_wallet.withdrawal = s.core_wallet.withdrawal.succeeded())
        }
        Action::WithdrawCoreBalanceError { error } => state.copy_with(|s| {
            s.core_wallet.withdrawal = s.core_wallet.withdrawal.failed(error.clone())
        }),
        Action::PromptedForEmail => state.copy_with(|s| s.prompted_for_email = true),
        Action::Unrecognized => Arc::clone(state),
    }
}

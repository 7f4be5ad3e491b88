//! Account state tree
//!
//! Values are replaced, never edited in place: the reducer clones the current
//! state, overrides the affected fields and wraps the result in a new `Arc`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::AccountError;
use crate::keys::derive_address;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountState {
    pub account_created: bool,
    pub prompted_for_email: bool,
    /// Hex ciphertext of the backup phrase
    pub encrypted_backup_phrase: Option<String>,
    pub identity_account: IdentityAccount,
    pub bitcoin_account: BitcoinAccount,
    pub core_wallet: CoreWallet,
}

impl AccountState {
    pub fn initial() -> Self {
        Self {
            account_created: false,
            prompted_for_email: false,
            encrypted_backup_phrase: None,
            identity_account: IdentityAccount::default(),
            bitcoin_account: BitcoinAccount::default(),
            core_wallet: CoreWallet::default(),
        }
    }

    /// Clone, apply `f` to the copy, and return it as a new state
    pub fn copy_with(&self, f: impl FnOnce(&mut AccountState)) -> Arc<AccountState> {
        let mut next = self.clone();
        f(&mut next);
        Arc::new(next)
    }
}

impl Default for AccountState {
    fn default() -> Self {
        Self::initial()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityAccount {
    pub public_keychain: Option<String>,
    pub addresses: Vec<String>,
    /// Only the first derived keypair is ever retained
    pub keypairs: Vec<IdentityKeypair>,
    pub address_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityKeypair {
    pub key: String,
    #[serde(rename = "keyID")]
    pub key_id: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitcoinAccount {
    pub public_keychain: Option<String>,
    pub addresses: Vec<String>,
    pub address_index: u32,
    pub balances: BalanceMap,
}

/// Append the address at `address_index + 1` of the account's public keychain
fn advance(
    public_keychain: Option<&str>,
    addresses: &mut Vec<String>,
    address_index: &mut u32,
) -> Result<(), AccountError> {
    let keychain = public_keychain
        .ok_or_else(|| AccountError::InvalidKeychain("account has no public keychain".into()))?;
    let next_index = address_index
        .checked_add(1)
        .ok_or_else(|| AccountError::Key("address index overflow".into()))?;

    addresses.push(derive_address(keychain, next_index)?);
    *address_index = next_index;
    Ok(())
}

impl IdentityAccount {
    pub fn derive_next_address(&mut self) -> Result<(), AccountError> {
        advance(
            self.public_keychain.as_deref(),
            &mut self.addresses,
            &mut self.address_index,
        )
    }
}

impl BitcoinAccount {
    pub fn derive_next_address(&mut self) -> Result<(), AccountError> {
        advance(
            self.public_keychain.as_deref(),
            &mut self.addresses,
            &mut self.address_index,
        )
    }
}

/// Address balances plus their `total`
///
/// Serializes flat, as `{"<address>": balance, ..., "total": sum}`, so
/// [`BalanceMap::TOTAL_KEY`] is never used as an address key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BalanceMap {
    #[serde(flatten)]
    pub addresses: BTreeMap<String, f64>,
    pub total: f64,
}

impl BalanceMap {
    pub const TOTAL_KEY: &'static str = "total";

    /// Build from results in arrival order; the first balance seen for an
    /// address wins and later duplicates are logged and skipped
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut balances = BalanceMap::default();

        for (address, balance) in results {
            if address == Self::TOTAL_KEY {
                log::warn!("Skipping balance for reserved key '{}'", address);
                continue;
            }
            if balances.addresses.contains_key(&address) {
                log::warn!("Duplicate address {} in addresses array", address);
                continue;
            }
            balances.total += balance;
            balances.addresses.insert(address, balance);
        }

        balances
    }

    pub fn get(&self, address: &str) -> Option<f64> {
        self.addresses.get(address).copied()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreWallet {
    pub address: Option<String>,
    pub balance: f64,
    pub withdrawal: Withdrawal,
}

/// Withdrawal sub-state: idle -> in progress -> success | error -> idle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub in_progress: bool,
    pub error: Option<String>,
    pub recipient_address: Option<String>,
    pub success: bool,
}

impl Withdrawal {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn started(recipient_address: String) -> Self {
        Self {
            in_progress: true,
            error: None,
            recipient_address: Some(recipient_address),
            success: false,
        }
    }

    /// Error is left untouched
    pub fn succeeded(&self) -> Self {
        Self {
            in_progress: false,
            success: true,
            ..self.clone()
        }
    }

    pub fn failed(&self, error: String) -> Self {
        Self {
            in_progress: false,
            success: false,
            error: Some(error),
            ..self.clone()
        }
    }
}

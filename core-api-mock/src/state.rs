/// In-memory ledger backing the mock endpoints

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::types::satoshis_to_btc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWithdrawal {
    pub address: String,
    pub min_confs: u32,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedBackup {
    pub email: String,
    pub encrypted_portal_key: String,
}

#[derive(Debug, Default)]
struct Ledger {
    address_balances: HashMap<String, f64>,
    failing_addresses: HashSet<String>,
    wallet_address: String,
    wallet_balance_sats: u64,
    withdrawals: Vec<RecordedWithdrawal>,
    backups: Vec<RecordedBackup>,
}

/// Shared mock state; clones share the same ledger
#[derive(Debug, Clone)]
pub struct MockLedger {
    api_password: Arc<str>,
    inner: Arc<RwLock<Ledger>>,
}

impl MockLedger {
    pub fn new(api_password: &str, wallet_address: &str, wallet_balance_sats: u64) -> Self {
        let ledger = Ledger {
            wallet_address: wallet_address.to_string(),
            wallet_balance_sats,
            ..Default::default()
        };
        Self {
            api_password: Arc::from(api_password),
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Ledger> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Accepts `bearer <password>` (scheme is case-insensitive)
    pub fn is_authorized(&self, header: Option<&str>) -> bool {
        let Some(value) = header else {
            return false;
        };
        match value.split_once(' ') {
            Some((scheme, password)) => {
                scheme.eq_ignore_ascii_case("bearer") && password == &*self.api_password
            }
            None => false,
        }
    }

    pub fn set_address_balance(&self, address: &str, balance: f64) {
        self.write()
            .address_balances
            .insert(address.to_string(), balance);
    }

    /// Make balance lookups for `address` answer 500
    pub fn fail_address(&self, address: &str) {
        self.write().failing_addresses.insert(address.to_string());
    }

    /// Balance in BTC, `None` when the address is marked failing
    pub fn address_balance(&self, address: &str) -> Option<f64> {
        let ledger = self.read();
        if ledger.failing_addresses.contains(address) {
            return None;
        }
        Some(ledger.address_balances.get(address).copied().unwrap_or(0.0))
    }

    pub fn wallet_address(&self) -> String {
        self.read().wallet_address.clone()
    }

    pub fn wallet_balance_sats(&self) -> u64 {
        self.read().wallet_balance_sats
    }

    pub fn wallet_balance_btc(&self) -> f64 {
        satoshis_to_btc(self.wallet_balance_sats())
    }

    /// Debit the wallet and record the withdrawal
    pub fn withdraw(&self, address: &str, min_confs: u32, amount: u64) -> Result<(), String> {
        let mut ledger = self.write();
        if amount == 0 {
            return Err("invalid amount".to_string());
        }
        if amount > ledger.wallet_balance_sats {
            return Err("insufficient funds".to_string());
        }
        ledger.wallet_balance_sats -= amount;
        ledger.withdrawals.push(RecordedWithdrawal {
            address: address.to_string(),
            min_confs,
            amount,
        });
        Ok(())
    }

    pub fn withdrawals(&self) -> Vec<RecordedWithdrawal> {
        self.read().withdrawals.clone()
    }

    pub fn record_backup(&self, email: &str, encrypted_portal_key: &str) {
        self.write().backups.push(RecordedBackup {
            email: email.to_string(),
            encrypted_portal_key: encrypted_portal_key.to_string(),
        });
    }

    pub fn backups(&self) -> Vec<RecordedBackup> {
        self.read().backups.clone()
    }
}

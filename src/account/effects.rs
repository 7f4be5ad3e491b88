//! Asynchronous account orchestrations
//!
//! Each one dispatches an optional "started" action, performs its external
//! calls and dispatches at most one terminal action. Only the withdrawal flow
//! turns a failure into state; refreshes log and leave state untouched.

use bitcoin::Network;
use zeroize::Zeroizing;

use super::action::{self, Action};
use super::store::Dispatch;
use crate::client::{send_backup_email, BalanceChecker, CoreWalletClient, Fetch};
use crate::config::{AccountConfig, DEFAULT_BACKUP_EMAIL_URL};
use crate::crypto;
use crate::error::AccountError;
use crate::keys::KeyManager;

pub struct AccountActions<F: Fetch> {
    fetch: F,
    network: Network,
    backup_email_url: String,
}

impl<F: Fetch> AccountActions<F> {
    pub fn new(fetch: F, network: Network) -> Self {
        Self {
            fetch,
            network,
            backup_email_url: DEFAULT_BACKUP_EMAIL_URL.to_string(),
        }
    }

    pub fn from_config(fetch: F, config: &AccountConfig) -> Self {
        Self {
            fetch,
            network: config.network,
            backup_email_url: config.backup_email_url.clone(),
        }
    }

    pub fn with_backup_email_url(mut self, url: impl Into<String>) -> Self {
        self.backup_email_url = url.into();
        self
    }

    pub fn fetch(&self) -> &F {
        &self.fetch
    }

    /// Create the account keychains and dispatch `CREATE_ACCOUNT`
    ///
    /// A supplied phrase that fails BIP39 validation is not an error: a fresh
    /// phrase is generated instead, so the user always ends up with a
    /// recoverable account. Derivation or encryption failures are returned
    /// and nothing is dispatched.
    pub async fn initialize_wallet<D: Dispatch + ?Sized>(
        &self,
        dispatch: &D,
        password: &str,
        backup_phrase: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), AccountError> {
        if let Some(email) = email {
            log::debug!("initialize_wallet: account email {}", email);
        }

        let supplied = match backup_phrase.filter(|p| !p.trim().is_empty()) {
            Some(words) => match KeyManager::parse_mnemonic(words) {
                Ok(mnemonic) => Some(mnemonic),
                Err(e) => {
                    log::warn!("initialize_wallet: {}, generating a new backup phrase", e);
                    None
                }
            },
            None => None,
        };

        let (master, mnemonic) = match supplied {
            Some(mnemonic) => (KeyManager::from_mnemonic(&mnemonic, self.network)?, mnemonic),
            None => KeyManager::generate(self.network)?,
        };

        let phrase = Zeroizing::new(mnemonic.to_string());
        let ciphertext =
            crypto::encrypt(phrase.as_bytes().to_vec(), password.to_string()).await?;
        let encrypted_backup_phrase = hex::encode(ciphertext);

        dispatch.dispatch(action::create_account(encrypted_backup_phrase, &master)?);
        Ok(())
    }

    /// Query every address and dispatch `UPDATE_BALANCES` once all answered
    pub async fn refresh_balances<D: Dispatch + ?Sized>(
        &self,
        dispatch: &D,
        address_balance_url: &str,
        addresses: &[String],
    ) {
        let checker = BalanceChecker::new(&self.fetch, address_balance_url);
        if let Some(balances) = checker.calculate_balances(addresses).await {
            dispatch.dispatch(action::update_balances(balances));
        }
    }

    pub async fn get_core_wallet_address<D: Dispatch + ?Sized>(
        &self,
        dispatch: &D,
        wallet_payment_address_url: &str,
        core_api_password: &str,
    ) {
        let client = CoreWalletClient::new(&self.fetch, core_api_password);
        match client.payment_address(wallet_payment_address_url).await {
            Ok(address) => dispatch.dispatch(action::update_core_wallet_address(address)),
            Err(e) => log::error!("get_core_wallet_address: error fetching address: {}", e),
        }
    }

    pub async fn refresh_core_wallet_balance<D: Dispatch + ?Sized>(
        &self,
        dispatch: &D,
        wallet_balance_url: &str,
        core_api_password: &str,
    ) {
        let client = CoreWalletClient::new(&self.fetch, core_api_password);
        match client.balance(wallet_balance_url).await {
            Ok(balance) => dispatch.dispatch(action::update_core_wallet_balance(balance)),
            Err(e) => log::error!("refresh_core_wallet_balance: error refreshing balance: {}", e),
        }
    }

    pub fn reset_core_withdrawal<D: Dispatch + ?Sized>(&self, dispatch: &D) {
        dispatch.dispatch(action::reset_core_balance_withdrawal());
    }

    /// Withdraw `amount` BTC from the core wallet to `recipient_address`
    pub async fn withdraw_bitcoin_from_core_wallet<D: Dispatch + ?Sized>(
        &self,
        dispatch: &D,
        core_wallet_withdraw_url: &str,
        recipient_address: &str,
        amount: f64,
        core_api_password: &str,
    ) {
        dispatch.dispatch(action::withdrawing_core_balance(
            recipient_address.to_string(),
        ));

        let client = CoreWalletClient::new(&self.fetch, core_api_password);
        let terminal: Action = match client
            .withdraw(core_wallet_withdraw_url, recipient_address, amount)
            .await
        {
            Ok(()) => {
                log::info!("Withdrew {} BTC to {}", amount, recipient_address);
                action::withdraw_core_balance_success()
            }
            Err(e) => {
                log::error!("withdraw_bitcoin_from_core_wallet: {}", e);
                action::withdraw_core_balance_error(e.withdrawal_message())
            }
        };
        dispatch.dispatch(terminal);
    }

    /// Mark the email prompt handled, then ask the backup service to email
    /// the encrypted backup phrase
    pub async fn email_keychain_backup<D: Dispatch + ?Sized>(
        &self,
        dispatch: &D,
        email: &str,
        encrypted_backup_phrase: &str,
    ) {
        log::debug!("email_keychain_backup: {}", email);
        dispatch.dispatch(action::prompted_for_email());

        match send_backup_email(&self.fetch, &self.backup_email_url, email, encrypted_backup_phrase)
            .await
        {
            Ok(()) => log::debug!("email_keychain_backup: backup sent to {}", email),
            Err(e) => log::error!("email_keychain_backup: error backing up keychain: {}", e),
        }
    }

    pub fn skip_email_backup<D: Dispatch + ?Sized>(&self, dispatch: &D) {
        log::trace!("skip_email_backup");
        dispatch.dispatch(action::prompted_for_email());
    }
}

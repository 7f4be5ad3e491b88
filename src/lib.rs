//! Portal account: identity and bitcoin keychains for a browser wallet
//!
//! This crate holds the account half of the portal's state. Action creators
//! derive key material, encrypt the backup phrase and talk to the explorer
//! and core node; a pure reducer folds their results into an immutable
//! state tree.
//!
//! # Architecture
//!
//! - **Keys**: BIP39 backup phrase and BIP32 identity/bitcoin keychains
//! - **Crypto**: password encryption of the backup phrase
//! - **Client**: balance explorer, core node wallet and backup email over HTTP
//! - **Account**: actions, reducer, store and async orchestrations
//!
//! # Example
//!
//! ```ignore
//! use portal_account::{AccountActions, AccountStore, ReqwestFetch};
//!
//! let store = AccountStore::new();
//! let actions = AccountActions::new(ReqwestFetch::new(), bitcoin::Network::Bitcoin);
//!
//! actions.initialize_wallet(&store, "password", None, None).await?;
//!
//! let addresses = store.state().bitcoin_account.addresses.clone();
//! actions
//!     .refresh_balances(&store, "https://explorer/addr/{address}", &addresses)
//!     .await;
//! ```

pub mod account;
pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod keys;

pub use account::{
    account_reducer, AccountActions, AccountState, AccountStore, Action, BalanceMap, Dispatch,
    Withdrawal,
};
pub use client::{Fetch, FetchResponse, ReqwestFetch};
pub use config::AccountConfig;
pub use error::AccountError;
pub use keys::{derive_address, KeyManager, MasterKeychain, PublicKeychain};

pub type Result<T> = std::result::Result<T, AccountError>;

//! HTTP collaborators of the account actions
//!
//! - `fetch` - injected HTTP capability and its reqwest implementation
//! - `balance` - per-address balance queries with a count-based fan-in
//! - `core_wallet` - core node wallet address, balance and withdrawal
//! - `backup` - keychain backup email

pub mod backup;
pub mod balance;
pub mod core_wallet;
pub mod fetch;

pub use backup::send_backup_email;
pub use balance::{balance_url, BalanceBarrier, BalanceChecker};
pub use core_wallet::{btc_to_satoshis, CoreWalletClient, WithdrawalRequest};
pub use fetch::{authorization_header_value, Fetch, FetchResponse, ReqwestFetch};

//! Account store
//!
//! - `state.rs` - immutable state tree and its copy-with helpers
//! - `action.rs` - action enum and synchronous creators
//! - `reducer.rs` - pure state transitions
//! - `store.rs` - dispatch target holding the current state
//! - `effects.rs` - asynchronous orchestrations (derivation, encryption, HTTP)

pub mod action;
pub mod effects;
pub mod reducer;
pub mod state;
pub mod store;

pub use action::Action;
pub use effects::AccountActions;
pub use reducer::account_reducer;
pub use state::{
    AccountState, BalanceMap, BitcoinAccount, CoreWallet, IdentityAccount, IdentityKeypair,
    Withdrawal,
};
pub use store::{AccountStore, Dispatch};

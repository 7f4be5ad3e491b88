use std::sync::Arc;
use tokio::sync::watch;

use super::action::Action;
use super::reducer::account_reducer;
use super::state::AccountState;

/// Sink for actions produced by the account action creators
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, action: Action);
}

/// Single-writer holder of the current account state
///
/// Every dispatch runs the reducer against the current state and swaps in
/// the result. Subscribers are woken only when the reducer produced a new
/// state.
pub struct AccountStore {
    state: watch::Sender<Arc<AccountState>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::with_state(AccountState::initial())
    }

    pub fn with_state(state: AccountState) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(state));
        Self { state: tx }
    }

    /// Current state snapshot
    pub fn state(&self) -> Arc<AccountState> {
        Arc::clone(&self.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<AccountState>> {
        self.state.subscribe()
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatch for AccountStore {
    fn dispatch(&self, action: Action) {
        log::debug!("dispatch: {:?}", action);
        self.state.send_if_modified(|current| {
            let next = account_reducer(current, &action);
            if Arc::ptr_eq(current, &next) {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

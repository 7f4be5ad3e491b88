mod common;

use bitcoin::Network;
use portal_account::account::action;
use portal_account::{account_reducer, derive_address, AccountState, Action, KeyManager};
use std::sync::Arc;

fn created_state() -> Arc<AccountState> {
    let mnemonic = KeyManager::parse_mnemonic(common::TEST_MNEMONIC).unwrap();
    let master = KeyManager::from_mnemonic(&mnemonic, Network::Bitcoin).unwrap();
    let create = action::create_account("00ff".to_string(), &master).unwrap();
    account_reducer(&Arc::new(AccountState::initial()), &create)
}

#[test]
fn test_every_handled_action_produces_new_state() {
    common::init_logger();
    let state = created_state();

    let actions = vec![
        action::delete_account(),
        action::new_identity_address(),
        action::new_bitcoin_address(),
        action::update_backup_phrase("aa".into()),
        action::update_core_wallet_address("1core".into()),
        action::update_core_wallet_balance(0.1),
        action::reset_core_balance_withdrawal(),
        action::withdrawing_core_balance("1dest".into()),
        action::withdraw_core_balance_success(),
        action::withdraw_core_balance_error("boom".into()),
        action::prompted_for_email(),
    ];

    for action in actions {
        let snapshot = (*state).clone();
        let next = account_reducer(&state, &action);
        assert!(!Arc::ptr_eq(&state, &next), "{:?} returned same state", action);
        assert_eq!(*state, snapshot, "{:?} mutated its input", action);
    }
}

#[test]
fn test_unknown_wire_action_is_identity() {
    let state = created_state();
    let action: Action = serde_json::from_str(r#"{"type":"SOMETHING_ELSE"}"#).unwrap();
    assert_eq!(action, Action::Unrecognized);
    assert!(Arc::ptr_eq(&state, &account_reducer(&state, &action)));
}

#[test]
fn test_create_account_properties() {
    let state = created_state();

    assert!(state.account_created);
    assert_eq!(state.encrypted_backup_phrase.as_deref(), Some("00ff"));

    let identity = &state.identity_account;
    let keychain = identity.public_keychain.as_deref().unwrap();
    assert_eq!(identity.address_index, 0);
    assert_eq!(identity.addresses, vec![derive_address(keychain, 0).unwrap()]);
    assert_eq!(identity.keypairs.len(), 1);
    assert_eq!(identity.keypairs[0].address, identity.addresses[0]);

    let bitcoin = &state.bitcoin_account;
    let keychain = bitcoin.public_keychain.as_deref().unwrap();
    assert_eq!(bitcoin.address_index, 0);
    assert_eq!(bitcoin.addresses, vec![derive_address(keychain, 0).unwrap()]);
    assert!(bitcoin.addresses[0].starts_with('1'));
}

#[test]
fn test_new_addresses_follow_public_keychain() {
    let mut state = created_state();

    for _ in 0..4 {
        state = account_reducer(&state, &action::new_bitcoin_address());
    }
    for _ in 0..2 {
        state = account_reducer(&state, &action::new_identity_address());
    }

    let bitcoin = &state.bitcoin_account;
    let keychain = bitcoin.public_keychain.as_deref().unwrap();
    assert_eq!(bitcoin.address_index, 4);
    assert_eq!(bitcoin.addresses.len(), 5);
    for (i, address) in bitcoin.addresses.iter().enumerate() {
        assert_eq!(address, &derive_address(keychain, i as u32).unwrap());
    }

    let identity = &state.identity_account;
    let keychain = identity.public_keychain.as_deref().unwrap();
    assert_eq!(identity.address_index, 2);
    assert_eq!(identity.addresses.len(), 3);
    assert_eq!(identity.addresses[2], derive_address(keychain, 2).unwrap());
    assert_eq!(identity.keypairs.len(), 1);
}

#[test]
fn test_balances_survive_address_derivation() {
    let state = created_state();
    let balances = portal_account::BalanceMap::from_results(vec![("1a".to_string(), 0.5)]);
    let state = account_reducer(&state, &action::update_balances(balances.clone()));
    let state = account_reducer(&state, &action::new_bitcoin_address());

    assert_eq!(state.bitcoin_account.balances, balances);
    assert_eq!(state.bitcoin_account.address_index, 1);
}

#[test]
fn test_withdrawal_state_machine() {
    let state = created_state();

    let started = account_reducer(&state, &action::withdrawing_core_balance("1dest".into()));
    let w = &started.core_wallet.withdrawal;
    assert!(w.in_progress);
    assert!(!w.success);
    assert_eq!(w.error, None);
    assert_eq!(w.recipient_address.as_deref(), Some("1dest"));

    let succeeded = account_reducer(&started, &action::withdraw_core_balance_success());
    let w = &succeeded.core_wallet.withdrawal;
    assert!(!w.in_progress);
    assert!(w.success);
    assert_eq!(w.recipient_address.as_deref(), Some("1dest"));

    let failed = account_reducer(
        &started,
        &action::withdraw_core_balance_error("insufficient funds".into()),
    );
    let w = &failed.core_wallet.withdrawal;
    assert!(!w.in_progress);
    assert!(!w.success);
    assert_eq!(w.error.as_deref(), Some("insufficient funds"));

    let reset = account_reducer(&failed, &action::reset_core_balance_withdrawal());
    let w = &reset.core_wallet.withdrawal;
    assert!(!w.in_progress);
    assert!(!w.success);
    assert_eq!(w.error, None);
    assert_eq!(w.recipient_address, None);
}

#[test]
fn test_delete_account_keeps_keychains() {
    let state = created_state();
    let deleted = account_reducer(&state, &action::delete_account());

    assert!(!deleted.account_created);
    assert_eq!(deleted.encrypted_backup_phrase, None);
    assert_eq!(deleted.identity_account, state.identity_account);
    assert_eq!(deleted.bitcoin_account, state.bitcoin_account);
}

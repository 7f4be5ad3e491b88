//! Deterministic key derivation
//!
//! - Backup phrase generation and validation (BIP39)
//! - Identity and bitcoin keychains from the master key (BIP32)
//! - Child address derivation from a public keychain

mod address;
mod master;

pub use address::{derive_address, p2pkh_address, PublicKeychain};
pub use master::{AccountKeys, KeyManager, MasterKeychain, ENTROPY_BYTES, IDENTITY_KEYCHAIN_PATH};

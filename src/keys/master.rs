use bip39::Mnemonic;
use bitcoin::bip32::{ChildNumber, DerivationPath, Xpriv, Xpub};
use bitcoin::secp256k1::Secp256k1;
use bitcoin::{Network, NetworkKind};
use rand::rngs::OsRng;
use rand::RngCore;
use std::str::FromStr;
use zeroize::Zeroizing;

use super::address::{p2pkh_address, PublicKeychain};
use crate::error::AccountError;

/// Identity keychain: `m/888'/0'`
pub const IDENTITY_KEYCHAIN_PATH: &str = "m/888'/0'";

/// Bytes of entropy behind a freshly generated backup phrase (24 words)
pub const ENTROPY_BYTES: usize = 32;

pub struct KeyManager;

impl KeyManager {
    /// Generate a new random master keychain together with its backup phrase
    ///
    /// The master keychain is derived from the phrase, so feeding the phrase
    /// back through [`KeyManager::from_mnemonic`] reproduces the same keys.
    pub fn generate(network: Network) -> Result<(MasterKeychain, Mnemonic), AccountError> {
        let mut entropy = Zeroizing::new([0u8; ENTROPY_BYTES]);
        OsRng.fill_bytes(&mut entropy[..]);

        let mnemonic = Mnemonic::from_entropy(&entropy[..])
            .map_err(|e| AccountError::InvalidMnemonic(e.to_string()))?;

        let master = Self::from_mnemonic(&mnemonic, network)?;
        Ok((master, mnemonic))
    }

    /// Parse and validate a backup phrase
    pub fn parse_mnemonic(words: &str) -> Result<Mnemonic, AccountError> {
        Mnemonic::parse(words).map_err(|e| AccountError::InvalidMnemonic(e.to_string()))
    }

    /// Derive the master keychain from a backup phrase (empty BIP39 passphrase)
    pub fn from_mnemonic(
        mnemonic: &Mnemonic,
        network: Network,
    ) -> Result<MasterKeychain, AccountError> {
        let seed = Zeroizing::new(mnemonic.to_seed(""));
        MasterKeychain::from_seed(network, &seed[..])
    }
}

/// Root of the hierarchical keychain; never leaves memory in plaintext
pub struct MasterKeychain {
    xprv: Xpriv,
}

impl MasterKeychain {
    /// Create a master keychain from raw seed bytes (16 to 64 bytes)
    pub fn from_seed(network: Network, seed: &[u8]) -> Result<Self, AccountError> {
        if seed.len() < 16 || seed.len() > 64 {
            return Err(AccountError::Key(format!(
                "seed must be 16 to 64 bytes, got {}",
                seed.len()
            )));
        }

        let xprv = Xpriv::new_master(network, seed)?;
        Ok(Self { xprv })
    }

    /// BIP44 coin type implied by the master key's network
    pub fn coin_type(&self) -> u32 {
        match self.xprv.network {
            NetworkKind::Main => 0,
            NetworkKind::Test => 1,
        }
    }

    /// Bitcoin keychain path: `m/44'/<coin>'/0'`
    pub fn bitcoin_keychain_path(&self) -> String {
        format!("m/44'/{}'/0'", self.coin_type())
    }

    pub fn identity_private_keychain(&self) -> Result<Xpriv, AccountError> {
        self.derive(IDENTITY_KEYCHAIN_PATH)
    }

    pub fn bitcoin_private_keychain(&self) -> Result<Xpriv, AccountError> {
        self.derive(&self.bitcoin_keychain_path())
    }

    fn derive(&self, path: &str) -> Result<Xpriv, AccountError> {
        let secp = Secp256k1::new();
        let derivation_path = DerivationPath::from_str(path)?;
        Ok(self.xprv.derive_priv(&secp, &derivation_path)?)
    }

    /// Derive the public material recorded when an account is created
    pub fn account_keys(&self) -> Result<AccountKeys, AccountError> {
        let secp = Secp256k1::new();

        let identity_keychain = self.identity_private_keychain()?;
        let bitcoin_keychain = self.bitcoin_private_keychain()?;

        let identity_public = PublicKeychain::new(Xpub::from_priv(&secp, &identity_keychain));
        let bitcoin_public = PublicKeychain::new(Xpub::from_priv(&secp, &bitcoin_keychain));

        let first_identity_node =
            identity_keychain.derive_priv(&secp, &[ChildNumber::from_normal_idx(0)?])?;
        let first_identity_pubkey = first_identity_node.private_key.public_key(&secp);
        let first_identity_address =
            p2pkh_address(first_identity_pubkey, first_identity_node.network).to_string();

        let first_bitcoin_address = bitcoin_public.address(0)?.to_string();

        log::debug!(
            "Derived account keys: identity {}, bitcoin {}",
            first_identity_address,
            first_bitcoin_address
        );

        Ok(AccountKeys {
            identity_public_keychain: identity_public.to_hex(),
            bitcoin_public_keychain: bitcoin_public.to_hex(),
            first_identity_address,
            first_bitcoin_address,
            first_identity_key: hex::encode(first_identity_node.private_key.secret_bytes()),
            first_identity_key_id: hex::encode(first_identity_pubkey.serialize()),
        })
    }
}

/// Public keychains plus the first identity keypair of a new account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountKeys {
    pub identity_public_keychain: String,
    pub bitcoin_public_keychain: String,
    pub first_identity_address: String,
    pub first_bitcoin_address: String,
    /// Hex secret key of identity child 0
    pub first_identity_key: String,
    /// Hex compressed public key of identity child 0
    pub first_identity_key_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_produces_24_words() {
        let (_, mnemonic) = KeyManager::generate(Network::Bitcoin).unwrap();
        assert_eq!(mnemonic.to_string().split_whitespace().count(), 24);
    }

    #[test]
    fn test_generated_phrase_regenerates_keys() {
        let (master, mnemonic) = KeyManager::generate(Network::Bitcoin).unwrap();
        let restored = KeyManager::from_mnemonic(&mnemonic, Network::Bitcoin).unwrap();
        assert_eq!(master.account_keys().unwrap(), restored.account_keys().unwrap());
    }

    #[test]
    fn test_invalid_mnemonic_rejected() {
        let result = KeyManager::parse_mnemonic("abandon abandon abandon");
        assert!(matches!(result, Err(AccountError::InvalidMnemonic(_))));
    }

    #[test]
    fn test_empty_seed_rejected() {
        assert!(matches!(
            MasterKeychain::from_seed(Network::Bitcoin, &[]),
            Err(AccountError::Key(_))
        ));
    }

    #[test]
    fn test_coin_type_follows_network() {
        let mnemonic = KeyManager::parse_mnemonic(TEST_PHRASE).unwrap();
        let mainnet = KeyManager::from_mnemonic(&mnemonic, Network::Bitcoin).unwrap();
        let regtest = KeyManager::from_mnemonic(&mnemonic, Network::Regtest).unwrap();
        assert_eq!(mainnet.bitcoin_keychain_path(), "m/44'/0'/0'");
        assert_eq!(regtest.bitcoin_keychain_path(), "m/44'/1'/0'");
    }

    #[test]
    fn test_account_keys_shape() {
        let mnemonic = KeyManager::parse_mnemonic(TEST_PHRASE).unwrap();
        let master = KeyManager::from_mnemonic(&mnemonic, Network::Bitcoin).unwrap();
        let keys = master.account_keys().unwrap();

        assert_eq!(keys.identity_public_keychain.len(), 156);
        assert_eq!(keys.bitcoin_public_keychain.len(), 156);
        assert_ne!(keys.identity_public_keychain, keys.bitcoin_public_keychain);
        assert_eq!(keys.first_identity_key.len(), 64);
        assert_eq!(keys.first_identity_key_id.len(), 66);
        assert!(keys.first_identity_address.starts_with('1'));
        assert!(keys.first_bitcoin_address.starts_with('1'));
    }

    #[test]
    fn test_first_identity_address_matches_public_derivation() {
        let mnemonic = KeyManager::parse_mnemonic(TEST_PHRASE).unwrap();
        let master = KeyManager::from_mnemonic(&mnemonic, Network::Bitcoin).unwrap();
        let keys = master.account_keys().unwrap();

        let public = PublicKeychain::from_hex(&keys.identity_public_keychain).unwrap();
        assert_eq!(public.address(0).unwrap().to_string(), keys.first_identity_address);
    }
}

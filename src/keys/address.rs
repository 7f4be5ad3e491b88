use bitcoin::bip32::{ChildNumber, Xpub};
use bitcoin::key::CompressedPublicKey;
use bitcoin::secp256k1::{self, Secp256k1};
use bitcoin::{Address, NetworkKind};

use crate::error::AccountError;

/// Extended public key stored in account state as hex
///
/// Child addresses are derived without any private key material, which is
/// what lets the reducer extend an address list from state alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeychain {
    xpub: Xpub,
}

impl PublicKeychain {
    pub fn new(xpub: Xpub) -> Self {
        Self { xpub }
    }

    /// Decode the hex form of a 78-byte BIP32 extended public key
    pub fn from_hex(encoded: &str) -> Result<Self, AccountError> {
        let bytes =
            hex::decode(encoded).map_err(|e| AccountError::InvalidKeychain(e.to_string()))?;
        let xpub =
            Xpub::decode(&bytes).map_err(|e| AccountError::InvalidKeychain(e.to_string()))?;
        Ok(Self { xpub })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.xpub.encode())
    }

    /// Non-hardened child key at `index`
    pub fn child(&self, index: u32) -> Result<Xpub, AccountError> {
        let secp = Secp256k1::verification_only();
        let child_number = ChildNumber::from_normal_idx(index)?;
        Ok(self.xpub.derive_pub(&secp, &[child_number])?)
    }

    /// P2PKH address of the child at `index`
    pub fn address(&self, index: u32) -> Result<Address, AccountError> {
        let child = self.child(index)?;
        Ok(p2pkh_address(child.public_key, self.xpub.network))
    }
}

/// Address string at `index` of a hex-encoded public keychain
pub fn derive_address(public_keychain: &str, index: u32) -> Result<String, AccountError> {
    Ok(PublicKeychain::from_hex(public_keychain)?
        .address(index)?
        .to_string())
}

pub fn p2pkh_address(public_key: secp256k1::PublicKey, network: NetworkKind) -> Address {
    Address::p2pkh(CompressedPublicKey(public_key).pubkey_hash(), network)
}

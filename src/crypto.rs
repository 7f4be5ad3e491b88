//! Backup phrase encryption
//!
//! Argon2id stretches the password into an AES-256-GCM key. Each call draws a
//! fresh salt and nonce, so encrypting the same phrase twice yields different
//! ciphertexts that both decrypt under the same password.
//!
//! Format: [version(1)][salt(16)][nonce(12)][ciphertext+tag(variable)]

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::Argon2;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::AccountError;

const VERSION: u8 = 1;
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const HEADER_LEN: usize = 1 + SALT_LEN + NONCE_LEN;

fn derive_key(password: &str, salt: &[u8]) -> Result<Zeroizing<[u8; 32]>, AccountError> {
    let mut key = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt, &mut key[..])
        .map_err(|e| AccountError::Crypto(e.to_string()))?;
    Ok(key)
}

/// Encrypt `plaintext` under `password` (blocking)
pub fn encrypt_blocking(plaintext: &[u8], password: &str) -> Result<Vec<u8>, AccountError> {
    let mut salt = [0u8; SALT_LEN];
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut nonce_bytes);

    let key = derive_key(password, &salt)?;
    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| AccountError::Crypto(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|e| AccountError::Crypto(e.to_string()))?;

    let mut result = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    result.push(VERSION);
    result.extend_from_slice(&salt);
    result.extend_from_slice(&nonce_bytes);
    result.extend_from_slice(&ciphertext);

    Ok(result)
}

/// Decrypt data produced by [`encrypt_blocking`] (blocking)
pub fn decrypt_blocking(data: &[u8], password: &str) -> Result<Vec<u8>, AccountError> {
    if data.len() <= HEADER_LEN {
        return Err(AccountError::Crypto("Invalid ciphertext length".to_string()));
    }

    if data[0] != VERSION {
        return Err(AccountError::Crypto(format!(
            "Unsupported encryption version: {}",
            data[0]
        )));
    }

    let salt = &data[1..1 + SALT_LEN];
    let nonce = Nonce::from_slice(&data[1 + SALT_LEN..HEADER_LEN]);

    let key = derive_key(password, salt)?;
    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| AccountError::Crypto(e.to_string()))?;

    cipher
        .decrypt(nonce, &data[HEADER_LEN..])
        .map_err(|_| AccountError::Crypto("Decryption failed: wrong password or corrupted data".to_string()))
}

/// Encrypt on the blocking pool; key stretching is CPU-bound
pub async fn encrypt(plaintext: Vec<u8>, password: String) -> Result<Vec<u8>, AccountError> {
    let plaintext = Zeroizing::new(plaintext);
    let password = Zeroizing::new(password);
    tokio::task::spawn_blocking(move || encrypt_blocking(&plaintext, &password))
        .await
        .map_err(|e| AccountError::Crypto(format!("encryption task failed: {}", e)))?
}

/// Decrypt on the blocking pool
pub async fn decrypt(ciphertext: Vec<u8>, password: String) -> Result<Vec<u8>, AccountError> {
    let password = Zeroizing::new(password);
    tokio::task::spawn_blocking(move || decrypt_blocking(&ciphertext, &password))
        .await
        .map_err(|e| AccountError::Crypto(format!("decryption task failed: {}", e)))?
}

/// Decrypt a hex `encryptedBackupPhrase` back into the phrase text
pub async fn decrypt_backup_phrase(
    encrypted_hex: &str,
    password: &str,
) -> Result<Zeroizing<String>, AccountError> {
    let ciphertext =
        hex::decode(encrypted_hex).map_err(|e| AccountError::Crypto(e.to_string()))?;
    let plaintext = Zeroizing::new(decrypt(ciphertext, password.to_string()).await?);
    let phrase = std::str::from_utf8(&plaintext)
        .map_err(|e| AccountError::Crypto(e.to_string()))?
        .to_string();
    Ok(Zeroizing::new(phrase))
}

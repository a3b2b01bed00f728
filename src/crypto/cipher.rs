//! AES-256-GCM authenticated encryption.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `open` splits the nonce back out
//! before decrypting and verifying the tag.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]
//!
//! `open` fails with the single `AuthFailure` error whether the key is
//! wrong or the blob was corrupted — callers must not be able to tell
//! the two apart.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{LockdirError, Result};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Required key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Seal `plaintext` under a 32-byte `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
/// A key of any other length is a programmer error, reported as
/// `EncryptionFailed`.
pub fn seal(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    // Build the cipher from the raw key bytes.
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| LockdirError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Fresh random nonce for every seal — never reused under the same key.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    // Encrypt and authenticate the plaintext.
    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| LockdirError::EncryptionFailed(format!("encryption error: {e}")))?;

    // Prepend the nonce so the caller only needs to store one blob.
    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Open a blob that was produced by `seal`.
///
/// Expects the first 12 bytes to be the nonce, followed by the
/// ciphertext and tag.  A blob too short to hold a nonce and a tag
/// mismatch both collapse into `AuthFailure`; a key of the wrong
/// length is a programmer error, reported as `EncryptionFailed` just
/// like in `seal`.
pub fn open(key: &[u8], blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < NONCE_LEN {
        return Err(LockdirError::AuthFailure);
    }

    // Split nonce from ciphertext.
    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| LockdirError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Decrypt and verify the auth tag.
    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| LockdirError::AuthFailure)?;

    Ok(plaintext)
}

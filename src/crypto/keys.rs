//! Master key and recovery key hierarchy.
//!
//! A vault is protected by a single random 256-bit master key that
//! encrypts everything.  The master key itself is never stored in
//! plaintext — it exists on disk only in two wrapped forms:
//!
//! - sealed under the Argon2id password-derived key (`master.key`)
//! - sealed under the recovery key directly (`recovery.key`)
//!
//! Both wrap the *same* master key, so either credential can unlock the
//! vault.  A future password change only needs to reseal the first
//! wrapping — the file objects never have to be re-encrypted.

use rand::TryRngCore;
use zeroize::Zeroize;

use crate::crypto::cipher::{open, seal, KEY_LEN};
use crate::crypto::kdf::derive_key;
use crate::errors::{LockdirError, Result};

/// Number of hex characters per dash-separated display group.
const DISPLAY_GROUP_LEN: usize = 8;

/// The vault's master key.  Zeroed on drop so it never lingers in
/// memory after an operation completes.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Generate a fresh random master key.
    ///
    /// Panics if the OS random source is unavailable.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::rngs::OsRng
            .try_fill_bytes(&mut bytes)
            .expect("OS RNG unavailable");
        Self { bytes }
    }

    /// Wrap raw bytes as a `MasterKey`.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to `seal`/`open`).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// The recovery key — a second random secret that can unwrap the master
/// key as an alternative to the password.  Surfaced to the user exactly
/// once at initialization; it cannot be regenerated from any on-disk
/// state.  Zeroed on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct RecoveryKey {
    bytes: [u8; KEY_LEN],
}

impl RecoveryKey {
    /// Generate a fresh random recovery key.
    ///
    /// Panics if the OS random source is unavailable.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::rngs::OsRng
            .try_fill_bytes(&mut bytes)
            .expect("OS RNG unavailable");
        Self { bytes }
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Format the key for transcription: hex, split into 8 groups of 8
    /// characters, e.g. `5025f74e-c5d7a54a-…`.
    pub fn to_display_string(&self) -> String {
        let hex_key = hex::encode(self.bytes);
        hex_key
            .as_bytes()
            .chunks(DISPLAY_GROUP_LEN)
            .map(|chunk| std::str::from_utf8(chunk).expect("hex output is ASCII"))
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Parse a recovery key from its display form.
    ///
    /// Accepts both the dash-grouped form and a plain 64-character hex
    /// string.
    pub fn parse(input: &str) -> Result<Self> {
        let compact: String = input.trim().chars().filter(|c| *c != '-').collect();

        let mut decoded = hex::decode(&compact).map_err(|_| {
            LockdirError::InvalidRecoveryKeyFormat(
                "recovery key must be hexadecimal (dashes allowed)".into(),
            )
        })?;

        if decoded.len() != KEY_LEN {
            decoded.zeroize();
            return Err(LockdirError::InvalidRecoveryKeyFormat(format!(
                "recovery key must be {} hex characters, got {}",
                KEY_LEN * 2,
                compact.len()
            )));
        }

        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self { bytes })
    }
}

/// Seal the master key under a password-derived key.
///
/// Derives the wrapping key with Argon2id from `password` + `salt`,
/// then seals the master key bytes under it.
pub fn wrap_with_password(master: &MasterKey, password: &[u8], salt: &[u8]) -> Result<Vec<u8>> {
    let mut derived = derive_key(password, salt)?;
    let wrapped = seal(&derived, master.as_bytes());
    derived.zeroize();
    wrapped
}

/// Unseal the master key using the password.
///
/// Any authentication failure — wrong password or a corrupted wrapped
/// key — surfaces as `InvalidPassword`.
pub fn unwrap_with_password(wrapped: &[u8], password: &[u8], salt: &[u8]) -> Result<MasterKey> {
    let mut derived = derive_key(password, salt)?;
    let result = open(&derived, wrapped);
    derived.zeroize();

    match result {
        Ok(plaintext) => master_key_from_plaintext(plaintext)
            .ok_or(LockdirError::InvalidPassword),
        Err(LockdirError::AuthFailure) => Err(LockdirError::InvalidPassword),
        Err(e) => Err(e),
    }
}

/// Seal the master key under the recovery key directly (no KDF — the
/// recovery key already has full entropy).
pub fn wrap_with_recovery_key(master: &MasterKey, recovery: &RecoveryKey) -> Result<Vec<u8>> {
    seal(recovery.as_bytes(), master.as_bytes())
}

/// Unseal the master key using the recovery key.
///
/// Any authentication failure surfaces as `InvalidRecoveryKey`.
pub fn unwrap_with_recovery_key(wrapped: &[u8], recovery: &RecoveryKey) -> Result<MasterKey> {
    match open(recovery.as_bytes(), wrapped) {
        Ok(plaintext) => master_key_from_plaintext(plaintext)
            .ok_or(LockdirError::InvalidRecoveryKey),
        Err(LockdirError::AuthFailure) => Err(LockdirError::InvalidRecoveryKey),
        Err(e) => Err(e),
    }
}

/// Convert an unwrapped plaintext back into a `MasterKey`, zeroizing
/// the intermediate buffer.  Returns `None` if the plaintext is not
/// exactly 32 bytes (a corrupted wrapped-key file).
fn master_key_from_plaintext(mut plaintext: Vec<u8>) -> Option<MasterKey> {
    if plaintext.len() != KEY_LEN {
        plaintext.zeroize();
        return None;
    }
    let mut bytes = [0u8; KEY_LEN];
    bytes.copy_from_slice(&plaintext);
    plaintext.zeroize();
    Some(MasterKey::new(bytes))
}

//! Password-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects against brute-force and
//! GPU-based attacks.  The parameters are fixed: raising the memory
//! cost raises the per-guess cost of an offline attack, while one
//! interactive unlock stays sub-second.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::TryRngCore;

use crate::errors::{LockdirError, Result};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of the derived key in bytes (256 bits, for AES-256).
const KEY_LEN: usize = 32;

/// Argon2id memory cost in KiB (64 MiB).
const ARGON_MEMORY_KIB: u32 = 65_536;

/// Argon2id time cost (iterations).
const ARGON_ITERATIONS: u32 = 1;

/// Argon2id parallelism lanes.
const ARGON_LANES: u32 = 4;

/// Derive a 32-byte key from a password and a 32-byte salt.
///
/// Deterministic: the same password + salt always produce the same key.
/// Fails only if the salt length is wrong — a salt of any other length
/// means a corrupted or foreign vault.
pub fn derive_key(password: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    if salt.len() != SALT_LEN {
        return Err(LockdirError::InvalidSaltLength {
            expected: SALT_LEN,
            got: salt.len(),
        });
    }

    let params = Params::new(ARGON_MEMORY_KIB, ARGON_ITERATIONS, ARGON_LANES, Some(KEY_LEN))
        .map_err(|e| LockdirError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(password, salt, &mut key)
        .map_err(|e| LockdirError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random 32-byte salt.
///
/// Panics if the OS random source is unavailable — nothing sensible
/// can be done without it.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng
        .try_fill_bytes(&mut salt)
        .expect("OS RNG unavailable");
    salt
}

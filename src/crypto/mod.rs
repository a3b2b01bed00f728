//! Cryptographic primitives for Lockdir.
//!
//! This module provides:
//! - AES-256-GCM sealing and opening of byte blobs (`cipher`)
//! - Argon2id password-based key derivation (`kdf`)
//! - Master/recovery key generation and wrapping (`keys`)

pub mod cipher;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, derive_key, ...};
pub use cipher::{open, seal};
pub use kdf::{derive_key, generate_salt};
pub use keys::{MasterKey, RecoveryKey};

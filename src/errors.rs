use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Lockdir.
#[derive(Debug, Error)]
pub enum LockdirError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// The single, deliberately opaque authenticated-decryption failure.
    ///
    /// A wrong key and corrupted or tampered ciphertext are
    /// indistinguishable from this error alone.
    #[error("Decryption failed — wrong key or corrupted data")]
    AuthFailure,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Invalid salt length: expected {expected} bytes, got {got}")]
    InvalidSaltLength { expected: usize, got: usize },

    // --- Unlock errors ---
    #[error("Invalid password — wrong password or corrupted vault")]
    InvalidPassword,

    #[error("Invalid recovery key — wrong key or corrupted vault")]
    InvalidRecoveryKey,

    #[error("Invalid recovery key format: {0}")]
    InvalidRecoveryKeyFormat(String),

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("File '{0}' already exists in the vault")]
    FileAlreadyExists(String),

    #[error("No file in the vault matches '{0}'")]
    FileNotFound(String),

    #[error("Object '{0}' not found in the vault")]
    ObjectNotFound(String),

    #[error("Cannot add '{0}' — only regular files are supported")]
    NotARegularFile(PathBuf),

    // --- Storage errors ---
    /// Any underlying I/O failure, wrapped with the operation and path so
    /// the user can see what failed and where. Never carries key material.
    #[error("{op} failed for {path}: {source}")]
    Storage {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl LockdirError {
    /// Wrap an `io::Error` with the operation name and the path it hit.
    pub fn storage(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LockdirError::Storage {
            op,
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for Lockdir results.
pub type Result<T> = std::result::Result<T, LockdirError>;

//! Vault module — encrypted file storage for one directory.
//!
//! This module provides:
//! - `FileRecord` / `VaultIndex` metadata types and fuzzy name
//!   resolution (`index`)
//! - the high-level `Vault` controller for initialize/unlock and all
//!   file operations (`controller`)

pub mod controller;
pub mod index;

// Re-export the most commonly used items.
pub use controller::Vault;
pub use index::{find_record, FileRecord, VaultIndex};

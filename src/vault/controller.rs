//! High-level vault operations.
//!
//! `Vault` wraps the storage layout and the crypto layer so callers can
//! work with simple method calls like `vault.add_file(&key, path)`.
//!
//! Every operation is synchronous and runs start to finish in the
//! calling thread.  Two processes mutating the same vault concurrently
//! are NOT safe: index writes are last-writer-wins, so one of two
//! concurrent additions can silently vanish.  Callers that need
//! cross-process safety must serialize vault operations externally.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::crypto::cipher::{open, seal};
use crate::crypto::kdf::generate_salt;
use crate::crypto::keys::{self, MasterKey, RecoveryKey};
use crate::errors::{LockdirError, Result};
use crate::storage::{
    generate_object_id, list_directory_files, read_plaintext_file, secure_delete,
    write_plaintext_file, VaultLayout,
};

use super::index::{find_record, FileRecord, VaultIndex};

/// A vault rooted at one directory.
pub struct Vault {
    layout: VaultLayout,
}

impl Vault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            layout: VaultLayout::new(root),
        }
    }

    /// The protected directory.
    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    /// Returns `true` if a vault has been initialized at this root.
    pub fn exists(&self) -> bool {
        self.layout.exists()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Create a new vault and sweep the directory's existing files into it.
    ///
    /// Runs the key ceremony:
    /// 1. generate master key
    /// 2. generate recovery key
    /// 3. generate salt, persist it
    /// 4. seal master key under the password-derived key, persist
    /// 5. seal master key under the recovery key, persist
    /// 6. seal an empty index under the master key, persist
    ///
    /// then encrypts every regular, non-hidden file directly under the
    /// root and securely deletes the plaintext originals.
    ///
    /// Returns the recovery key — the ONLY time it is ever available.
    /// It cannot be recomputed from anything on disk.
    pub fn initialize(&self, password: &[u8]) -> Result<RecoveryKey> {
        // Collect the files to sweep before the marker directory appears.
        let files_to_encrypt = list_directory_files(self.layout.root())?;

        self.layout.create()?;

        let master = MasterKey::generate();
        let recovery = RecoveryKey::generate();

        let salt = generate_salt();
        self.layout.write_salt(&salt)?;

        let wrapped_pw = keys::wrap_with_password(&master, password, &salt)?;
        self.layout.write_master_key(&wrapped_pw)?;

        let wrapped_rk = keys::wrap_with_recovery_key(&master, &recovery)?;
        self.layout.write_recovery_key(&wrapped_rk)?;

        self.write_index(&master, &VaultIndex::empty())?;

        for path in &files_to_encrypt {
            self.add_file(&master, path)?;
        }

        // Delete originals only after every file is sealed.  A failed
        // delete leaves plaintext behind but loses nothing.
        for path in &files_to_encrypt {
            if let Err(e) = secure_delete(path) {
                eprintln!("warning: failed to delete {}: {e}", path.display());
            }
        }

        Ok(recovery)
    }

    /// Derive the password key from the stored salt and unwrap the
    /// master key.  Fails with `InvalidPassword` if the wrapped key
    /// does not authenticate.
    pub fn unlock_with_password(&self, password: &[u8]) -> Result<MasterKey> {
        if !self.exists() {
            return Err(LockdirError::VaultNotFound(self.root().to_path_buf()));
        }
        let salt = self.layout.read_salt()?;
        let wrapped = self.layout.read_master_key()?;
        keys::unwrap_with_password(&wrapped, password, &salt)
    }

    /// Unwrap the master key with the recovery key directly.  Fails
    /// with `InvalidRecoveryKey` if the wrapped key does not
    /// authenticate.  The resulting key is interchangeable with the
    /// one obtained via the password path.
    pub fn unlock_with_recovery_key(&self, recovery: &RecoveryKey) -> Result<MasterKey> {
        if !self.exists() {
            return Err(LockdirError::VaultNotFound(self.root().to_path_buf()));
        }
        let wrapped = self.layout.read_recovery_key()?;
        keys::unwrap_with_recovery_key(&wrapped, recovery)
    }

    // ------------------------------------------------------------------
    // File operations
    // ------------------------------------------------------------------

    /// List the records in the vault, in index order.
    pub fn list_files(&self, master: &MasterKey) -> Result<Vec<FileRecord>> {
        Ok(self.read_index(master)?.files)
    }

    /// Seal a file into the vault.  Returns the stored name.
    ///
    /// The plaintext source file is left untouched — callers decide
    /// whether to delete it afterwards.
    pub fn add_file(&self, master: &MasterKey, path: &Path) -> Result<String> {
        let (data, size, modified) = read_plaintext_file(path)?;

        let mut index = self.read_index(master)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| LockdirError::NotARegularFile(path.to_path_buf()))?;

        if index.contains_name(&name) {
            return Err(LockdirError::FileAlreadyExists(name));
        }

        let object_id = generate_object_id(&name);
        let sealed = seal(master.as_bytes(), &data)?;
        self.layout.write_object(&object_id, &sealed)?;

        index.files.push(FileRecord {
            object_id: object_id.clone(),
            original_name: name.clone(),
            size,
            modified_time: DateTime::<Utc>::from(modified),
            added_time: Utc::now(),
        });

        // If the index cannot be persisted, remove the object we just
        // wrote so it does not end up orphaned.  Best-effort: this is a
        // compensation, not a transaction.
        if let Err(e) = self.write_index(master, &index) {
            let _ = self.layout.delete_object(&object_id);
            return Err(e);
        }

        Ok(name)
    }

    /// Resolve `query` with fuzzy matching, decrypt the file, and write
    /// it into `dest_dir` under its original name.  Returns the
    /// resolved name.  The record stays in the vault.
    pub fn extract_file(
        &self,
        master: &MasterKey,
        query: &str,
        dest_dir: &Path,
    ) -> Result<String> {
        let index = self.read_index(master)?;

        let record = find_record(&index.files, query)
            .ok_or_else(|| LockdirError::FileNotFound(query.to_string()))?;

        self.extract_record(master, record, dest_dir)?;
        Ok(record.original_name.clone())
    }

    /// Decrypt every file in the vault into `dest_dir`.  Returns the
    /// number of files written.
    pub fn extract_all(&self, master: &MasterKey, dest_dir: &Path) -> Result<usize> {
        let index = self.read_index(master)?;

        let mut count = 0;
        for record in &index.files {
            self.extract_record(master, record, dest_dir)?;
            count += 1;
        }

        Ok(count)
    }

    /// Resolve `query`, drop its record from the index, and delete its
    /// object.  Returns the resolved name.  No plaintext is written.
    pub fn remove_file(&self, master: &MasterKey, query: &str) -> Result<String> {
        let mut index = self.read_index(master)?;

        let record = find_record(&index.files, query)
            .ok_or_else(|| LockdirError::FileNotFound(query.to_string()))?
            .clone();

        index
            .files
            .retain(|f| f.object_id != record.object_id);

        // Persist the index first: an interrupted removal must leave an
        // orphaned object at worst, never a record pointing at nothing.
        self.write_index(master, &index)?;
        self.layout.delete_object(&record.object_id)?;

        Ok(record.original_name)
    }

    /// Extract a file, then remove it from the vault.
    pub fn drop_file(&self, master: &MasterKey, query: &str, dest_dir: &Path) -> Result<String> {
        let resolved = self.extract_file(master, query, dest_dir)?;
        self.remove_file(master, &resolved)?;
        Ok(resolved)
    }

    /// Extract every file, then clear the vault.  Returns the number of
    /// files extracted.
    pub fn drop_all(&self, master: &MasterKey, dest_dir: &Path) -> Result<usize> {
        let count = self.extract_all(master, dest_dir)?;
        self.clear(master)?;
        Ok(count)
    }

    /// Delete every object referenced by the index and reseal an empty
    /// index.  Irreversible — callers are expected to confirm first.
    pub fn clear(&self, master: &MasterKey) -> Result<()> {
        let index = self.read_index(master)?;

        // Empty index goes down first, for the same orphan-over-loss
        // reasoning as `remove_file`.
        self.write_index(master, &VaultIndex::empty())?;

        for record in &index.files {
            self.layout.delete_object(&record.object_id)?;
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Index persistence
    // ------------------------------------------------------------------

    /// Read and open the sealed metadata index.
    fn read_index(&self, master: &MasterKey) -> Result<VaultIndex> {
        let sealed = self.layout.read_meta()?;
        let plain = open(master.as_bytes(), &sealed)?;

        serde_json::from_slice(&plain)
            .map_err(|e| LockdirError::SerializationError(format!("metadata index: {e}")))
    }

    /// Serialize and seal the index, then persist it atomically.
    fn write_index(&self, master: &MasterKey, index: &VaultIndex) -> Result<()> {
        let plain = serde_json::to_vec(index)
            .map_err(|e| LockdirError::SerializationError(format!("metadata index: {e}")))?;

        let sealed = seal(master.as_bytes(), &plain)?;
        self.layout.write_meta(&sealed)
    }

    /// Decrypt one record's object and write it under its original name
    /// inside `dest_dir`.
    fn extract_record(
        &self,
        master: &MasterKey,
        record: &FileRecord,
        dest_dir: &Path,
    ) -> Result<()> {
        let sealed = self.layout.read_object(&record.object_id)?;
        let plaintext = open(master.as_bytes(), &sealed)?;

        let output = dest_dir.join(&record.original_name);
        write_plaintext_file(&output, &plaintext, record.modified_time.into())
    }
}

//! On-disk vault layout and encrypted object store.
//!
//! A vault lives in a `.lockdir` directory inside the protected root:
//!
//! ```text
//! <root>/.lockdir/
//!   salt          — 32 raw bytes, plaintext
//!   master.key    — master key sealed under the password-derived key
//!   recovery.key  — master key sealed under the recovery key
//!   meta          — sealed metadata index (single blob)
//!   objects/      — one sealed blob per file, named <object_id>.enc
//! ```
//!
//! Everything written here is already ciphertext except the salt.  All
//! writes go through a temp-file + rename so an interrupted process
//! never leaves a truncated blob behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use rand::TryRngCore;
use sha2::{Digest, Sha256};

use crate::errors::{LockdirError, Result};

/// Name of the vault marker directory inside the protected root.
pub const VAULT_DIR_NAME: &str = ".lockdir";

const SALT_FILE: &str = "salt";
const META_FILE: &str = "meta";
const MASTER_KEY_FILE: &str = "master.key";
const RECOVERY_KEY_FILE: &str = "recovery.key";
const OBJECTS_DIR: &str = "objects";
const OBJECT_EXT: &str = "enc";

/// Object IDs are the first 8 bytes of a SHA-256 hash, hex-encoded.
const OBJECT_ID_BYTES: usize = 8;

/// Buffer size for the secure-delete overwrite pass.
const OVERWRITE_CHUNK: usize = 4096;

/// Resolves every path inside a vault from its root directory.
pub struct VaultLayout {
    root: PathBuf,
    vault_dir: PathBuf,
}

impl VaultLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let vault_dir = root.join(VAULT_DIR_NAME);
        Self { root, vault_dir }
    }

    /// The protected directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.lockdir` marker directory.
    pub fn vault_dir(&self) -> &Path {
        &self.vault_dir
    }

    pub fn salt_path(&self) -> PathBuf {
        self.vault_dir.join(SALT_FILE)
    }

    pub fn meta_path(&self) -> PathBuf {
        self.vault_dir.join(META_FILE)
    }

    pub fn master_key_path(&self) -> PathBuf {
        self.vault_dir.join(MASTER_KEY_FILE)
    }

    pub fn recovery_key_path(&self) -> PathBuf {
        self.vault_dir.join(RECOVERY_KEY_FILE)
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.vault_dir.join(OBJECTS_DIR)
    }

    pub fn object_path(&self, object_id: &str) -> PathBuf {
        self.objects_dir().join(format!("{object_id}.{OBJECT_EXT}"))
    }

    /// Returns `true` if a vault marker directory exists at this root.
    pub fn exists(&self) -> bool {
        self.vault_dir.is_dir()
    }

    /// Create the vault directory structure.
    ///
    /// Fails with `VaultAlreadyExists` if a vault is already present.
    pub fn create(&self) -> Result<()> {
        if self.exists() {
            return Err(LockdirError::VaultAlreadyExists(self.root.clone()));
        }

        fs::create_dir_all(self.objects_dir())
            .map_err(|e| LockdirError::storage("create vault directory", &self.vault_dir, e))?;

        // On Unix, the vault directory is owner-only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(&self.vault_dir, perms)
                .map_err(|e| LockdirError::storage("set vault permissions", &self.vault_dir, e))?;
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Singleton slots
    // ------------------------------------------------------------------

    pub fn write_salt(&self, salt: &[u8]) -> Result<()> {
        atomic_write(&self.salt_path(), salt, "write salt")
    }

    pub fn read_salt(&self) -> Result<Vec<u8>> {
        self.read_slot(&self.salt_path(), "read salt")
    }

    pub fn write_master_key(&self, wrapped: &[u8]) -> Result<()> {
        atomic_write(&self.master_key_path(), wrapped, "write master key file")
    }

    pub fn read_master_key(&self) -> Result<Vec<u8>> {
        self.read_slot(&self.master_key_path(), "read master key file")
    }

    pub fn write_recovery_key(&self, wrapped: &[u8]) -> Result<()> {
        atomic_write(&self.recovery_key_path(), wrapped, "write recovery key file")
    }

    pub fn read_recovery_key(&self) -> Result<Vec<u8>> {
        self.read_slot(&self.recovery_key_path(), "read recovery key file")
    }

    pub fn write_meta(&self, sealed: &[u8]) -> Result<()> {
        atomic_write(&self.meta_path(), sealed, "write metadata")
    }

    pub fn read_meta(&self) -> Result<Vec<u8>> {
        self.read_slot(&self.meta_path(), "read metadata")
    }

    /// Read a singleton file; a missing file means the vault itself is
    /// missing or incomplete.
    fn read_slot(&self, path: &Path, op: &'static str) -> Result<Vec<u8>> {
        match fs::read(path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LockdirError::VaultNotFound(self.root.clone()))
            }
            Err(e) => Err(LockdirError::storage(op, path, e)),
        }
    }

    // ------------------------------------------------------------------
    // Objects
    // ------------------------------------------------------------------

    /// Persist a sealed blob under `object_id`.
    pub fn write_object(&self, object_id: &str, data: &[u8]) -> Result<()> {
        atomic_write(&self.object_path(object_id), data, "write object")
    }

    /// Retrieve the sealed blob stored under `object_id`.
    pub fn read_object(&self, object_id: &str) -> Result<Vec<u8>> {
        let path = self.object_path(object_id);
        match fs::read(&path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LockdirError::ObjectNotFound(object_id.to_string()))
            }
            Err(e) => Err(LockdirError::storage("read object", path, e)),
        }
    }

    /// Remove an object, overwriting its bytes first.
    pub fn delete_object(&self, object_id: &str) -> Result<()> {
        let path = self.object_path(object_id);
        if !path.exists() {
            return Err(LockdirError::ObjectNotFound(object_id.to_string()));
        }
        secure_delete(&path)
    }
}

/// Generate an opaque identifier for a new object.
///
/// Hashes the original name, a nanosecond timestamp, and 8 random bytes,
/// then truncates to 8 bytes of hex.  Collisions within one vault are
/// astronomically rare and are not checked for.
pub fn generate_object_id(original_name: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    let mut random = [0u8; 8];
    rand::rngs::OsRng
        .try_fill_bytes(&mut random)
        .expect("OS RNG unavailable");

    let mut hasher = Sha256::new();
    hasher.update(original_name.as_bytes());
    hasher.update(nanos.to_le_bytes());
    hasher.update(random);
    let digest = hasher.finalize();

    hex::encode(&digest[..OBJECT_ID_BYTES])
}

/// Write a file atomically: write to a temp file in the same directory,
/// then rename into place.  Readers never see a half-written file.
pub fn atomic_write(path: &Path, data: &[u8], op: &'static str) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, data).map_err(|e| LockdirError::storage(op, &tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| LockdirError::storage(op, path, e))?;

    Ok(())
}

/// Overwrite a file's full length with random bytes, then unlink it.
///
/// Falls back to zero bytes if the OS random source fails.  Best-effort
/// only: copy-on-write filesystems, SSD wear-leveling, and snapshots
/// can all retain the original bytes.
pub fn secure_delete(path: &Path) -> Result<()> {
    let len = fs::metadata(path)
        .map_err(|e| LockdirError::storage("stat file", path, e))?
        .len();

    let mut file = fs::OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|e| LockdirError::storage("open file for overwrite", path, e))?;

    let mut buf = [0u8; OVERWRITE_CHUNK];
    let mut remaining = len;
    while remaining > 0 {
        let n = remaining.min(OVERWRITE_CHUNK as u64) as usize;
        if rand::rngs::OsRng.try_fill_bytes(&mut buf[..n]).is_err() {
            buf[..n].fill(0);
        }
        file.write_all(&buf[..n])
            .map_err(|e| LockdirError::storage("overwrite file", path, e))?;
        remaining -= n as u64;
    }

    file.sync_all()
        .map_err(|e| LockdirError::storage("sync file", path, e))?;
    drop(file);

    fs::remove_file(path).map_err(|e| LockdirError::storage("delete file", path, e))
}

/// List the regular files directly inside `dir`, skipping hidden
/// entries and subdirectories.  Used by `initialize` to sweep a
/// directory's contents into a new vault.
pub fn list_directory_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).map_err(|e| LockdirError::storage("read directory", dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LockdirError::storage("read directory entry", dir, e))?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        let file_type = entry
            .file_type()
            .map_err(|e| LockdirError::storage("stat directory entry", entry.path(), e))?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

/// Read a plaintext file that is about to be added to the vault.
///
/// Returns its bytes, size, and modification time.
pub fn read_plaintext_file(path: &Path) -> Result<(Vec<u8>, u64, SystemTime)> {
    let meta = fs::metadata(path).map_err(|e| LockdirError::storage("stat file", path, e))?;
    if !meta.is_file() {
        return Err(LockdirError::NotARegularFile(path.to_path_buf()));
    }

    let data = fs::read(path).map_err(|e| LockdirError::storage("read file", path, e))?;
    let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);

    Ok((data, meta.len(), modified))
}

/// Write extracted plaintext back to disk, restoring its original
/// modification time (best-effort).
pub fn write_plaintext_file(path: &Path, data: &[u8], modified: SystemTime) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| LockdirError::storage("create directory", parent, e))?;
        }
    }

    fs::write(path, data).map_err(|e| LockdirError::storage("write file", path, e))?;

    // Restoring the timestamp is nice-to-have; ignore failures.
    if let Ok(file) = fs::File::options().write(true).open(path) {
        let _ = file.set_modified(modified);
    }

    Ok(())
}

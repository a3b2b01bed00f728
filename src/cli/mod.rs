//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::crypto::{MasterKey, RecoveryKey};
use crate::errors::{LockdirError, Result};
use crate::vault::Vault;

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Lockdir CLI: encrypted directory vault.
#[derive(Parser)]
#[command(
    name = "lockdir",
    about = "Encrypt a directory's files behind a password",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: current directory)
    #[arg(short = 'd', long, default_value = ".", global = true)]
    pub vault: PathBuf,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize a vault and encrypt every file already in the directory
    Init,

    /// Encrypt a file into the vault (securely deletes the original)
    Add {
        /// Path of the file to add
        file: PathBuf,
    },

    /// List the files in the vault
    List,

    /// Decrypt file(s) — the vault keeps its copies
    Extract {
        /// File to extract (fuzzy-matched; omit to extract everything)
        name: Option<String>,

        /// Directory to write decrypted files into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Decrypt file(s) and remove them from the vault
    Drop {
        /// File to drop (fuzzy-matched; omit to drop everything)
        name: Option<String>,

        /// Directory to write decrypted files into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Remove a file from the vault without extracting it
    Remove {
        /// File to remove (fuzzy-matched)
        name: String,
    },

    /// Remove ALL files from the vault without extracting them
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Unlock with the recovery key instead of the password
    Recover {
        #[command(subcommand)]
        action: RecoverAction,

        /// Recovery key (omit for a hidden prompt)
        #[arg(long, global = true)]
        key: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Recovery-key subcommands — the same read operations as the password
/// path, for when the password is lost.
#[derive(clap::Subcommand)]
pub enum RecoverAction {
    /// List files using the recovery key
    List,

    /// Extract file(s) using the recovery key
    Extract {
        /// File to extract (fuzzy-matched; omit to extract everything)
        name: Option<String>,

        /// Directory to write decrypted files into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the vault password, trying in order:
/// 1. `LOCKDIR_PASSWORD` env var (scripting/CI)
/// 2. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("LOCKDIR_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault password")
        .interact()
        .map_err(|e| LockdirError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used during `init`).
///
/// Also respects `LOCKDIR_PASSWORD` for scripted usage.  Enforces a
/// minimum password length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("LOCKDIR_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(LockdirError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose vault password")
            .with_confirmation("Confirm vault password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| LockdirError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Get the recovery key from `--key`, `LOCKDIR_RECOVERY_KEY`, or a
/// hidden prompt, and parse its dash-grouped hex form.
pub fn prompt_recovery_key(key_arg: Option<&str>) -> Result<RecoveryKey> {
    if let Some(key) = key_arg {
        return RecoveryKey::parse(key);
    }

    if let Ok(key) = std::env::var("LOCKDIR_RECOVERY_KEY") {
        if !key.is_empty() {
            return RecoveryKey::parse(&key);
        }
    }

    let key = Zeroizing::new(
        dialoguer::Password::new()
            .with_prompt("Enter recovery key")
            .interact()
            .map_err(|e| LockdirError::CommandFailed(format!("recovery key prompt: {e}")))?,
    );
    RecoveryKey::parse(&key)
}

/// Open the vault named by the CLI args and unlock it with the password.
pub fn unlock(cli: &Cli) -> Result<(Vault, MasterKey)> {
    let vault = Vault::new(&cli.vault);
    if !vault.exists() {
        return Err(LockdirError::VaultNotFound(cli.vault.clone()));
    }

    let password = prompt_password()?;
    let master = vault.unlock_with_password(password.as_bytes())?;
    Ok((vault, master))
}

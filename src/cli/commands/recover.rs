//! `lockdir recover` — unlock with the recovery key instead of the password.
//!
//! The recovery path supports the read operations needed to get data
//! back out of a vault whose password is lost: listing and extraction.

use crate::cli::output;
use crate::cli::{prompt_recovery_key, Cli, RecoverAction};
use crate::errors::{LockdirError, Result};
use crate::vault::Vault;

/// Execute a `recover` subcommand.
pub fn execute(cli: &Cli, action: &RecoverAction, key: Option<&str>) -> Result<()> {
    let vault = Vault::new(&cli.vault);
    if !vault.exists() {
        return Err(LockdirError::VaultNotFound(cli.vault.clone()));
    }

    let recovery = prompt_recovery_key(key)?;
    let master = vault.unlock_with_recovery_key(&recovery)?;

    match action {
        RecoverAction::List => {
            let files = vault.list_files(&master)?;
            output::info(&format!("{} file(s) in vault", files.len()));
            output::print_files_table(&files);
        }
        RecoverAction::Extract { name, out } => match name.as_deref() {
            Some(query) => {
                let resolved = vault.extract_file(&master, query, out)?;
                output::success(&format!("File extracted: {resolved}"));
            }
            None => {
                let count = vault.extract_all(&master, out)?;
                output::success(&format!("Extracted {count} file(s)"));
            }
        },
    }

    output::tip("Consider re-initializing the vault with a new password.");
    Ok(())
}

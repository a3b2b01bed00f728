//! `lockdir init` — create a vault and encrypt the directory's files.

use crate::cli::output;
use crate::cli::{prompt_new_password, Cli};
use crate::errors::{LockdirError, Result};
use crate::vault::Vault;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = Vault::new(&cli.vault);

    if vault.exists() {
        output::tip("Use `lockdir add <file>` to add files to the existing vault.");
        return Err(LockdirError::VaultAlreadyExists(cli.vault.clone()));
    }

    // New password, with confirmation and a minimum length.
    let password = prompt_new_password()?;

    output::info("Initializing vault and encrypting existing files...");
    let recovery = vault.initialize(password.as_bytes())?;

    output::success(&format!("Vault initialized at {}", vault.root().display()));
    output::success("All files have been encrypted and the originals securely deleted");

    // The one and only time the recovery key can be shown.
    println!();
    output::warning("Write down your recovery key — it will NEVER be shown again:");
    println!();
    println!("    {}", recovery.to_display_string());
    println!();
    output::tip("Anyone with this key can unlock the vault without the password.");
    output::tip("Run `lockdir list` to see the encrypted files.");

    Ok(())
}

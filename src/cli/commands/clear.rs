//! `lockdir clear` — remove ALL files from the vault without extracting.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{LockdirError, Result};

/// Execute the `clear` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before destroying data.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(
                "This will DELETE every file in the vault WITHOUT extracting them. Continue?",
            )
            .default(false)
            .interact()
            .map_err(|e| LockdirError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let (vault, master) = unlock(cli)?;
    vault.clear(&master)?;

    output::success("Vault cleared (all files removed)");
    Ok(())
}

//! `lockdir remove` — remove a file from the vault without extracting.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `remove` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let (vault, master) = unlock(cli)?;

    let resolved = vault.remove_file(&master, name)?;
    output::success(&format!("File removed: {resolved}"));

    Ok(())
}

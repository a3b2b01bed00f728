//! `lockdir add` — encrypt a file into the vault.

use std::path::Path;

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;
use crate::storage::secure_delete;

/// Execute the `add` command.
pub fn execute(cli: &Cli, file: &Path) -> Result<()> {
    let (vault, master) = unlock(cli)?;

    let name = vault.add_file(&master, file)?;

    // The plaintext original is consumed.  A failed delete is a warning,
    // not an error — the data is already sealed in the vault.
    if let Err(e) = secure_delete(file) {
        output::warning(&format!("failed to securely delete the original: {e}"));
    }

    output::success(&format!("File added: {name}"));
    Ok(())
}

//! `lockdir list` — display the vault's files in a table.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (vault, master) = unlock(cli)?;

    let files = vault.list_files(&master)?;

    output::info(&format!("{} file(s) in vault", files.len()));
    output::print_files_table(&files);

    Ok(())
}

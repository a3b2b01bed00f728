//! `lockdir drop` — extract file(s), then remove them from the vault.

use std::path::Path;

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `drop` command.
///
/// With a name, drops the single fuzzy-matched file; without one,
/// extracts everything and clears the vault.
pub fn execute(cli: &Cli, name: Option<&str>, out: &Path) -> Result<()> {
    let (vault, master) = unlock(cli)?;

    match name {
        Some(query) => {
            let resolved = vault.drop_file(&master, query, out)?;
            output::success(&format!(
                "Dropped: {resolved} (extracted and removed from vault)"
            ));
        }
        None => {
            let count = vault.drop_all(&master, out)?;
            output::success(&format!("Dropped {count} file(s) from vault"));
        }
    }

    Ok(())
}

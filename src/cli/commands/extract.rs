//! `lockdir extract` — decrypt file(s) while keeping them in the vault.

use std::path::Path;

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `extract` command.
///
/// With a name, extracts the single fuzzy-matched file; without one,
/// extracts everything.
pub fn execute(cli: &Cli, name: Option<&str>, out: &Path) -> Result<()> {
    let (vault, master) = unlock(cli)?;

    match name {
        Some(query) => {
            let resolved = vault.extract_file(&master, query, out)?;
            output::success(&format!("File extracted: {resolved}"));
        }
        None => {
            let count = vault.extract_all(&master, out)?;
            output::success(&format!("Extracted {count} file(s)"));
        }
    }

    Ok(())
}

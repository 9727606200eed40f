use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

/// Asks before deleting a file or folder. Returns true when the path is gone
/// afterwards, which includes the case where it never existed.
pub fn delete_if_allowed(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    let kind = if path.is_file() { "file" } else { "folder" };
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Is it ok to remove the {kind} \"{}\"?", path.display()))
        .interact_on(&Term::stdout())?;
    if confirmed {
        if path.is_file() {
            std::fs::remove_file(path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        } else {
            std::fs::remove_dir_all(path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
    }
    Ok(confirmed)
}

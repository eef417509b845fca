//! Init subcommand handler.

use std::path::Path;

use anyhow::{bail, Context, Result};

use tgm::Preset;

/// `tgm init`: write the built-in demo preset as a starting point.
pub fn handle_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Preset::default()
        .save(path)
        .with_context(|| format!("failed to write preset {}", path.display()))?;
    println!("Wrote demo preset to {}", path.display());
    Ok(())
}
